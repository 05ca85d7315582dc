/*!
 * Geographic coordinate types.
 *
 * Everything in this crate takes positions as WGS84 latitude-longitude
 * pairs in degrees and only converts into the raster's projected CRS at
 * the sampling boundary.
 */
use crate::{error::FuelMapResult, FuelMapError};

/// A latitude-longitude pair in degrees, WGS84.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lon: f64,
}

impl Coord {
    /// Check this is a finite position on the globe.
    ///
    /// Latitude must lie in [-90, 90] and longitude in [-180, 180], both
    /// ends inclusive. Anything else, NaN and infinities included, is
    /// rejected with `InvalidCoordinate`.
    pub fn validate(self) -> FuelMapResult<Self> {
        let Coord { lat, lon } = self;

        let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
        let lon_ok = lon.is_finite() && (-180.0..=180.0).contains(&lon);

        if !lat_ok || !lon_ok {
            return Err(FuelMapError::InvalidCoordinate { lat, lon });
        }

        Ok(self)
    }
}
