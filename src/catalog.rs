/*!
 * The fuel model parameter catalog.
 *
 * The deployed dataset ships three parallel tables keyed by model number:
 * class metadata, fuel load vectors, and surface-area-to-volume ratio
 * vectors. They are joined here once at startup into immutable records.
 * Any number present in one table but not the others means the dataset is
 * broken, and construction fails.
 */
use crate::{
    error::{CatalogError, FuelMapResult},
    FuelMapError, FuelModelCode,
};
use log::info;
use rustc_hash::FxHashMap as HashMap;
use std::fmt::{self, Display, Formatter};

/// Whether the model's live herbaceous load transfers to the dead fuel
/// class as it cures over the season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum FuelType {
    Static,
    Dynamic,
}

/**
 * One row of the class metadata table, as delivered by the table loader.
 */
#[derive(Debug, Clone)]
pub struct ModelClassRow {
    /// The model number the three tables join on.
    pub number: FuelModelCode,
    /// Short published code, like "GR1" or "TL2".
    pub code: String,
    pub name: String,
    pub description: String,
    pub fuel_type: FuelType,
    /// Fuel bed depth in feet.
    pub fuel_bed_depth: f64,
    /// Dead fuel moisture of extinction, as a fraction.
    pub dead_fuel_moisture_of_extinction: f64,
    /// Characteristic surface-area-to-volume ratio in ft^2/ft^3.
    pub characteristic_sav: f64,
    /// Bulk density in lb/ft^3.
    pub bulk_density: f64,
    pub relative_packing_ratio: f64,
}

/// One row of the fuel load table.
#[derive(Debug, Clone, Copy)]
pub struct FuelLoadRow {
    pub number: FuelModelCode,
    /// Loads in tons/acre: 1-hr, 10-hr, 100-hr dead, live herbaceous,
    /// live woody, in the table's fixed column order.
    pub values: [f64; 5],
}

/// One row of the SAV ratio table.
#[derive(Debug, Clone, Copy)]
pub struct SavRatioRow {
    pub number: FuelModelCode,
    /// Ratios in ft^2/ft^3: 1-hr dead, live herbaceous, live woody.
    /// 9999 marks a component the class does not carry.
    pub values: [f64; 3],
}

/**
 * A fully joined fuel model parameter record.
 *
 * Immutable once the catalog is built and shared read-only across all
 * request threads.
 */
#[derive(Debug, Clone)]
pub struct FuelModel {
    number: FuelModelCode,
    code: String,
    name: String,
    description: String,
    fuel_type: FuelType,
    fuel_load: [f64; 5],
    sav_ratio: [f64; 3],
    fuel_bed_depth: f64,
    dead_fuel_moisture_of_extinction: f64,
    characteristic_sav: f64,
    bulk_density: f64,
    relative_packing_ratio: f64,
}

impl FuelModel {
    pub fn number(&self) -> FuelModelCode {
        self.number
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn fuel_type(&self) -> FuelType {
        self.fuel_type
    }

    /// Loads in tons/acre in the table's fixed column order.
    pub fn fuel_load(&self) -> &[f64; 5] {
        &self.fuel_load
    }

    /// SAV ratios in ft^2/ft^3 in the table's fixed column order.
    pub fn sav_ratio(&self) -> &[f64; 3] {
        &self.sav_ratio
    }

    /// Fuel bed depth in feet.
    pub fn fuel_bed_depth(&self) -> f64 {
        self.fuel_bed_depth
    }

    /// Dead fuel moisture of extinction as a fraction.
    pub fn dead_fuel_moisture_of_extinction(&self) -> f64 {
        self.dead_fuel_moisture_of_extinction
    }

    pub fn characteristic_sav(&self) -> f64 {
        self.characteristic_sav
    }

    pub fn bulk_density(&self) -> f64 {
        self.bulk_density
    }

    pub fn relative_packing_ratio(&self) -> f64 {
        self.relative_packing_ratio
    }
}

impl Display for FuelModel {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let fl = &self.fuel_load;
        let sav = &self.sav_ratio;

        writeln!(f, "                Number: {}", self.number)?;
        writeln!(f, "                  Code: {}", self.code)?;
        writeln!(f, "                  Name: {}", self.name)?;
        writeln!(f, "                  Type: {}", self.fuel_type)?;
        writeln!(
            f,
            "             Fuel Load: {:.2}, {:.2}, {:.2}, {:.2}, {:.2} t/ac",
            fl[0], fl[1], fl[2], fl[3], fl[4]
        )?;
        writeln!(
            f,
            "             SAV Ratio: {:.0}, {:.0}, {:.0} ft^2/ft^3",
            sav[0], sav[1], sav[2]
        )?;
        writeln!(f, "        Fuel Bed Depth: {:.2} ft", self.fuel_bed_depth)?;
        writeln!(
            f,
            "Moisture of Extinction: {:.2}",
            self.dead_fuel_moisture_of_extinction
        )?;
        writeln!(
            f,
            "    Characteristic SAV: {:.0} ft^2/ft^3",
            self.characteristic_sav
        )?;
        writeln!(f, "          Bulk Density: {:.2} lb/ft^3", self.bulk_density)?;
        writeln!(
            f,
            "Relative Packing Ratio: {:.2}",
            self.relative_packing_ratio
        )
    }
}

/**
 * The joined catalog, keyed by model number.
 */
#[derive(Debug, Clone)]
pub struct FuelModelCatalog {
    models: HashMap<FuelModelCode, FuelModel>,
}

impl FuelModelCatalog {
    /// Join the three tables into one record per model number.
    ///
    /// Fails on the first inconsistency found: a class row without its
    /// fuel load or SAV row, a load or SAV row without a class row, a
    /// duplicated number within a table, or a non-finite numeric field.
    pub fn from_tables(
        classes: Vec<ModelClassRow>,
        fuel_loads: Vec<FuelLoadRow>,
        sav_ratios: Vec<SavRatioRow>,
    ) -> Result<Self, CatalogError> {
        let mut loads: HashMap<FuelModelCode, FuelLoadRow> = HashMap::default();
        for row in fuel_loads {
            if loads.insert(row.number, row).is_some() {
                return Err(CatalogError::DuplicateNumber {
                    table: "fuel load",
                    number: row.number,
                });
            }
        }

        let mut savs: HashMap<FuelModelCode, SavRatioRow> = HashMap::default();
        for row in sav_ratios {
            if savs.insert(row.number, row).is_some() {
                return Err(CatalogError::DuplicateNumber {
                    table: "SAV ratio",
                    number: row.number,
                });
            }
        }

        let mut models: HashMap<FuelModelCode, FuelModel> = HashMap::default();
        for class in classes {
            let number = class.number;

            if models.contains_key(&number) {
                return Err(CatalogError::DuplicateNumber {
                    table: "class",
                    number,
                });
            }

            let load = loads
                .remove(&number)
                .ok_or(CatalogError::MissingFuelLoad(number))?;
            let sav = savs
                .remove(&number)
                .ok_or(CatalogError::MissingSavRatio(number))?;

            let finite = load
                .values
                .iter()
                .chain(sav.values.iter())
                .all(|v| v.is_finite())
                && class.fuel_bed_depth.is_finite()
                && class.dead_fuel_moisture_of_extinction.is_finite()
                && class.characteristic_sav.is_finite()
                && class.bulk_density.is_finite()
                && class.relative_packing_ratio.is_finite();

            if !finite {
                return Err(CatalogError::NonFinite(number));
            }

            models.insert(
                number,
                FuelModel {
                    number,
                    code: class.code,
                    name: class.name,
                    description: class.description,
                    fuel_type: class.fuel_type,
                    fuel_load: load.values,
                    sav_ratio: sav.values,
                    fuel_bed_depth: class.fuel_bed_depth,
                    dead_fuel_moisture_of_extinction: class.dead_fuel_moisture_of_extinction,
                    characteristic_sav: class.characteristic_sav,
                    bulk_density: class.bulk_density,
                    relative_packing_ratio: class.relative_packing_ratio,
                },
            );
        }

        if let Some(&number) = loads.keys().next() {
            return Err(CatalogError::OrphanRow {
                table: "fuel load",
                number,
            });
        }

        if let Some(&number) = savs.keys().next() {
            return Err(CatalogError::OrphanRow {
                table: "SAV ratio",
                number,
            });
        }

        info!("Loaded fuel model catalog with {} models.", models.len());

        Ok(FuelModelCatalog { models })
    }

    /// Whether the number is a known model.
    pub fn contains(&self, code: FuelModelCode) -> bool {
        self.models.contains_key(&code)
    }

    pub fn get(&self, code: FuelModelCode) -> Option<&FuelModel> {
        self.models.get(&code)
    }

    /// The parameter record for a model number.
    ///
    /// Fails with `UnknownModelCode` when the number is not in the
    /// catalog. Code 0 is only valid here if the dataset ships a row for
    /// it, as the deployed one does.
    pub fn parameters_for(&self, code: FuelModelCode) -> FuelMapResult<&FuelModel> {
        self.get(code).ok_or(FuelMapError::UnknownModelCode(code))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FuelModel> {
        self.models.values()
    }
}
