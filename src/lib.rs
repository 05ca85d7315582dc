pub use catalog::{FuelLoadRow, FuelModel, FuelModelCatalog, FuelType, ModelClassRow, SavRatioRow};
pub use control_lines::{ControlLine, ControlLineStore};
pub use coords::Coord;
pub use error::{CatalogError, FuelMapError, FuelMapResult, GridError};
pub use fuel_map::{FuelMap, NON_BURNABLE};
pub use moisture::MoistureMap;
pub use projection::{conus_albers, AlbersEqualArea, ProjectedPoint};
pub use raster::RasterGrid;

/// The numeric identifier of a fuel model class.
pub type FuelModelCode = i32;

/**************************************************************************************************
 * Private Implementation
 *************************************************************************************************/
mod catalog;
mod control_lines;
mod coords;
mod error;
mod fuel_map;
mod moisture;
mod projection;
mod raster;
