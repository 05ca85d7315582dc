/*!
 * The classification engine behind the service endpoints.
 *
 * A [`FuelMap`] owns everything a request needs: the projection into the
 * raster's CRS, the classified band itself, the joined parameter catalog,
 * and the session scoped control line overrides. The first three are
 * immutable after construction and shared read-only across request
 * threads; only the override store is mutable, behind its own lock.
 */
use crate::{
    catalog::{FuelModel, FuelModelCatalog},
    control_lines::{ControlLine, ControlLineStore},
    coords::Coord,
    error::FuelMapResult,
    projection::{conus_albers, AlbersEqualArea},
    raster::RasterGrid,
    FuelMapError, FuelModelCode,
};
use log::info;

/// The reserved code for artificially non-burnable ground.
pub const NON_BURNABLE: FuelModelCode = 0;

/**
 * The fuel model resolution engine.
 */
#[derive(Debug)]
pub struct FuelMap {
    /// Transform from WGS84 into the classified band's CRS.
    projection: &'static AlbersEqualArea,
    /// The classified fuel model band, in projected coordinates.
    raster: RasterGrid,
    /// The joined parameter catalog.
    catalog: FuelModelCatalog,
    /// Session scoped overrides.
    control_lines: ControlLineStore,
}

impl FuelMap {
    /// Assemble the engine from a loaded raster band and catalog.
    pub fn new(raster: RasterGrid, catalog: FuelModelCatalog) -> Self {
        info!(
            "Fuel map ready with {}x{} cells and {} catalog models.",
            raster.width(),
            raster.height(),
            catalog.len()
        );

        FuelMap {
            projection: conus_albers(),
            raster,
            catalog,
            control_lines: ControlLineStore::new(),
        }
    }

    /// Resolve the fuel model code for one coordinate.
    ///
    /// When the point lies strictly inside one of the session's control
    /// lines the answer is code 0 and the raster is never consulted.
    /// Otherwise the point is projected and sampled, and the sampled code
    /// must be in the catalog. Code 0 is always a valid resolution whether
    /// or not the catalog carries a row for it.
    pub fn resolve_model(
        &self,
        session: Option<&str>,
        coord: Coord,
    ) -> FuelMapResult<FuelModelCode> {
        let coord = coord.validate()?;

        if let Some(session) = session {
            if self.control_lines.contains(session, coord) {
                return Ok(NON_BURNABLE);
            }
        }

        let point = self.projection.project(coord)?;
        let code = self.raster.sample(point.x, point.y)?;

        if code != NON_BURNABLE && !self.catalog.contains(code) {
            return Err(FuelMapError::UnknownModelCode(code));
        }

        Ok(code)
    }

    /// Resolve a batch of coordinates in input order.
    ///
    /// The first failing point aborts the whole batch with its error;
    /// there are no partial results.
    pub fn resolve_models(
        &self,
        session: Option<&str>,
        coords: &[Coord],
    ) -> FuelMapResult<Vec<FuelModelCode>> {
        coords
            .iter()
            .map(|&coord| self.resolve_model(session, coord))
            .collect()
    }

    /// The joined parameter record for a model number.
    pub fn parameters(&self, code: FuelModelCode) -> FuelMapResult<&FuelModel> {
        self.catalog.parameters_for(code)
    }

    /// Add a rectangular control line to a session.
    pub fn add_control_line(
        &self,
        session: &str,
        lat_min: f64,
        lat_max: f64,
        lon_min: f64,
        lon_max: f64,
    ) -> FuelMapResult<()> {
        let line = ControlLine::from_bounds(lat_min, lat_max, lon_min, lon_max)?;
        self.control_lines.insert(session, line);

        Ok(())
    }

    /// Drop one session's control lines.
    pub fn clear_control_lines(&self, session: &str) {
        self.control_lines.clear_session(session);
    }

    /// Drop every session's control lines.
    pub fn clear_all_control_lines(&self) {
        self.control_lines.clear_all();
    }

    pub fn control_lines(&self) -> &ControlLineStore {
        &self.control_lines
    }
}
