/*!
 * Reprojection from WGS84 latitude-longitude into the CRS of the
 * classified fuel model raster.
 *
 * The deployed raster uses the CONUS Albers Equal-Area Conic projection on
 * the GRS80 ellipsoid. Its parameters are constants of the deployment, not
 * of any request, so the one shared transform is built lazily and reused.
 * The forward equations are the ellipsoidal Albers formulas from Snyder's
 * "Map Projections: A Working Manual".
 */
use crate::{coords::Coord, error::FuelMapResult};
use once_cell::sync::OnceCell;

/// A point in the raster's projected CRS, in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    /// Metres east of the projection origin.
    pub x: f64,
    /// Metres north of the projection origin.
    pub y: f64,
}

/**
 * An Albers Equal-Area Conic projection with its derived constants.
 *
 * The constants that depend only on the ellipsoid and the chosen parallels
 * are computed once in the constructor so `project` is arithmetic only.
 */
#[derive(Debug, Clone, Copy)]
pub struct AlbersEqualArea {
    /// Semi-major axis of the ellipsoid in metres.
    a: f64,
    /// Square of the ellipsoid's first eccentricity.
    e2: f64,
    /// Central meridian in degrees.
    lon0: f64,
    /// Cone constant n derived from the two standard parallels.
    n: f64,
    /// Snyder's constant C.
    c: f64,
    /// Radius of the parallel at the latitude of origin in metres.
    rho0: f64,
}

impl AlbersEqualArea {
    /// Build the projection for a latitude-longitude origin and two
    /// standard parallels, all in degrees, on the GRS80 ellipsoid.
    fn new(lat0: f64, lon0: f64, lat1: f64, lat2: f64) -> Self {
        // GRS80 ellipsoid.
        const A: f64 = 6_378_137.0;
        const INV_F: f64 = 298.257_222_101;

        let f = 1.0 / INV_F;
        let e2 = f * (2.0 - f);

        let phi0 = lat0.to_radians();
        let phi1 = lat1.to_radians();
        let phi2 = lat2.to_radians();

        let m1 = m(e2, phi1);
        let m2 = m(e2, phi2);
        let q0 = q(e2, phi0);
        let q1 = q(e2, phi1);
        let q2 = q(e2, phi2);

        let n = (m1 * m1 - m2 * m2) / (q2 - q1);
        let c = m1 * m1 + n * q1;
        let rho0 = A * (c - n * q0).sqrt() / n;

        AlbersEqualArea {
            a: A,
            e2,
            lon0,
            n,
            c,
            rho0,
        }
    }

    /// Project a geographic coordinate onto the plane.
    ///
    /// Pure and deterministic. Fails with `InvalidCoordinate` when the
    /// input is not a finite position on the globe.
    pub fn project(&self, coord: Coord) -> FuelMapResult<ProjectedPoint> {
        let Coord { lat, lon } = coord.validate()?;

        let qp = q(self.e2, lat.to_radians());
        let rho = self.a * (self.c - self.n * qp).sqrt() / self.n;
        let theta = self.n * (lon - self.lon0).to_radians();

        Ok(ProjectedPoint {
            x: rho * theta.sin(),
            y: self.rho0 - rho * theta.cos(),
        })
    }
}

/// Snyder's m: the radius of the parallel at phi over a, eq 14-15.
fn m(e2: f64, phi: f64) -> f64 {
    let sin_phi = phi.sin();
    phi.cos() / (1.0 - e2 * sin_phi * sin_phi).sqrt()
}

/// Snyder's q: the authalic latitude term, eq 3-12.
fn q(e2: f64, phi: f64) -> f64 {
    let e = e2.sqrt();
    let sin_phi = phi.sin();
    let esin = e * sin_phi;

    (1.0 - e2)
        * (sin_phi / (1.0 - e2 * sin_phi * sin_phi)
            - (1.0 / (2.0 * e)) * ((1.0 - esin) / (1.0 + esin)).ln())
}

static CONUS_ALBERS: OnceCell<AlbersEqualArea> = OnceCell::new();

/// The fixed projection of the deployed fuel model raster.
///
/// CONUS Albers: standard parallels 29.5 and 45.5, origin at latitude 23,
/// central meridian -96, no false easting or northing.
pub fn conus_albers() -> &'static AlbersEqualArea {
    CONUS_ALBERS.get_or_init(|| AlbersEqualArea::new(23.0, -96.0, 29.5, 45.5))
}
