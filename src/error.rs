/*!
 * Error types for the classification core.
 *
 * Request-path failures are [`FuelMapError`]; everything that can only go
 * wrong while building the shared datasets at startup gets its own type so
 * callers can treat those as fatal.
 */
use crate::FuelModelCode;
use thiserror::Error;

/// Convenience alias for request-path results.
pub type FuelMapResult<T> = Result<T, FuelMapError>;

/**
 * A failure while answering a single request.
 *
 * These map one to one onto client-visible conditions. None of them are
 * retryable: the same inputs produce the same answer every time.
 */
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FuelMapError {
    /// Coordinate outside geographic range, or not a finite number.
    #[error("invalid coordinate lat: {lat}, lon: {lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },

    /// Projected point outside the raster extent, or a no-data cell.
    #[error("no raster coverage at x: {x}, y: {y}")]
    SampleUnavailable { x: f64, y: f64 },

    /// A code that is not in the fuel model catalog.
    #[error("unknown fuel model code {0}")]
    UnknownModelCode(FuelModelCode),

    /// Control line bounds that are not finite numbers.
    #[error(
        "invalid control line bounds lat: [{lat_min}, {lat_max}], lon: [{lon_min}, {lon_max}]"
    )]
    InvalidBounds {
        lat_min: f64,
        lat_max: f64,
        lon_min: f64,
        lon_max: f64,
    },
}

/**
 * An inconsistency detected while joining the three catalog tables.
 *
 * Any of these means the deployed dataset is broken. The service refuses to
 * start rather than serve partially joined parameter records.
 */
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// A class row with no matching row in the fuel load table.
    #[error("fuel model {0} has no fuel load row")]
    MissingFuelLoad(FuelModelCode),

    /// A class row with no matching row in the SAV ratio table.
    #[error("fuel model {0} has no SAV ratio row")]
    MissingSavRatio(FuelModelCode),

    /// A fuel load or SAV ratio row whose number has no class row.
    #[error("{table} row for model {number} has no class row")]
    OrphanRow {
        table: &'static str,
        number: FuelModelCode,
    },

    /// The same model number appears twice in one table.
    #[error("duplicate model number {number} in {table} table")]
    DuplicateNumber {
        table: &'static str,
        number: FuelModelCode,
    },

    /// A numeric field that is NaN or infinite.
    #[error("fuel model {0} has a non-finite numeric field")]
    NonFinite(FuelModelCode),
}

/// A malformed in-memory raster grid handed over by the dataset loader.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid data length {len} does not match {width}x{height}")]
    DataLength {
        width: usize,
        height: usize,
        len: usize,
    },

    #[error("grid cell size {0} must be positive and finite")]
    CellSize(f64),

    #[error("grid origin ({x}, {y}) must be finite")]
    Origin { x: f64, y: f64 },
}
