/*!
 * In-memory single band integer rasters.
 *
 * The dataset loader reads the classified GeoTIFFs elsewhere and hands
 * each band over as a ready-built grid. After that the grid is immutable,
 * so any number of request threads can sample it concurrently through
 * shared references with no locking.
 */
use crate::{
    error::{FuelMapResult, GridError},
    FuelMapError,
};

/**
 * A north-up, row-major, square-cell raster band.
 *
 * Coordinates are in whatever CRS the band was delivered in: the fuel
 * model band is in the projected CONUS Albers CRS, the moisture band is
 * geographic. The grid itself only does cell arithmetic.
 */
#[derive(Debug, Clone)]
pub struct RasterGrid {
    /// X coordinate of the west edge of the first column.
    west: f64,
    /// Y coordinate of the north edge of the first row.
    north: f64,
    /// Cell edge length in CRS units.
    cell_size: f64,
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Sentinel value marking cells with no data.
    no_data: i32,
    /// Cell values in row-major order starting at the northwest corner.
    values: Vec<i32>,
}

impl RasterGrid {
    /// Build a grid, checking the pieces agree with each other.
    pub fn new(
        west: f64,
        north: f64,
        cell_size: f64,
        width: usize,
        height: usize,
        no_data: i32,
        values: Vec<i32>,
    ) -> Result<Self, GridError> {
        if !west.is_finite() || !north.is_finite() {
            return Err(GridError::Origin { x: west, y: north });
        }

        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(GridError::CellSize(cell_size));
        }

        if values.len() != width * height {
            return Err(GridError::DataLength {
                width,
                height,
                len: values.len(),
            });
        }

        Ok(RasterGrid {
            west,
            north,
            cell_size,
            width,
            height,
            no_data,
            values,
        })
    }

    /// The raw value of the cell containing the point, no-data included,
    /// or `None` when the point falls outside the covered extent.
    ///
    /// The extent is half open: the west and north edges belong to the
    /// grid, the east and south edges do not.
    pub fn value_at(&self, x: f64, y: f64) -> Option<i32> {
        let col = (x - self.west) / self.cell_size;
        let row = (self.north - y) / self.cell_size;

        if !col.is_finite() || !row.is_finite() || col < 0.0 || row < 0.0 {
            return None;
        }

        let col = col as usize;
        let row = row as usize;
        if col >= self.width || row >= self.height {
            return None;
        }

        Some(self.values[row * self.width + col])
    }

    /// Sample the cell containing the point.
    ///
    /// Fails with `SampleUnavailable` when the point is outside the
    /// covered extent or the cell holds the no-data sentinel.
    pub fn sample(&self, x: f64, y: f64) -> FuelMapResult<i32> {
        match self.value_at(x, y) {
            Some(value) if value != self.no_data => Ok(value),
            _ => Err(FuelMapError::SampleUnavailable { x, y }),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn no_data(&self) -> i32 {
        self.no_data
    }
}
