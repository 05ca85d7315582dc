/*!
 * Live fuel moisture content lookups.
 *
 * The moisture dataset is separate from the classified fuel models: a
 * geographic-CRS raster of LFMC readings, sampled directly at (lon, lat)
 * with no reprojection. Unlike the classifier, a query outside the
 * covered extent answers with the dataset's fill value instead of an
 * error.
 */
use crate::{coords::Coord, error::FuelMapResult, raster::RasterGrid};
use log::info;

/// A live fuel moisture map in geographic coordinates.
#[derive(Debug, Clone)]
pub struct MoistureMap {
    grid: RasterGrid,
}

impl MoistureMap {
    pub fn new(grid: RasterGrid) -> Self {
        info!(
            "Loaded moisture map with {}x{} cells.",
            grid.width(),
            grid.height()
        );

        MoistureMap { grid }
    }

    /// The moisture reading at a geographic coordinate.
    ///
    /// Fails with `InvalidCoordinate` when the coordinate is not a finite
    /// position on the globe. Outside the covered extent, and on cells
    /// with no reading, the grid's no-data value is returned as the
    /// reading.
    pub fn value_at(&self, coord: Coord) -> FuelMapResult<i32> {
        let Coord { lat, lon } = coord.validate()?;

        Ok(self.grid.value_at(lon, lat).unwrap_or(self.grid.no_data()))
    }
}
