//! CSV-based rating table loader
//!
//! Loads factor tables and bracket schedules from CSV files in data/tables/

use std::error::Error;
use std::fs::File;
use std::path::Path;

use super::brackets::BracketSchedule;
use super::factors::{AgeCurve, FactorTable};

/// Default path to the rating tables directory
pub const DEFAULT_TABLES_PATH: &str = "data/tables";

/// Load the age factor curve from CSV
/// Rows: age,factor — order in the file is the curve's tie-break order
pub fn load_age_curve(path: &Path) -> Result<AgeCurve, Box<dyn Error>> {
    let file = File::open(path.join("age_factors.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut points = Vec::new();

    for result in reader.records() {
        let record = result?;
        let age: u8 = record[0].parse()?;
        let factor: f64 = record[1].parse()?;
        points.push((age, factor));
    }

    Ok(AgeCurve::new(points))
}

/// Load an exact-match factor table from CSV
/// Rows: key,factor
pub fn load_factor_table(path: &Path, file_name: &str, dimension: &str) -> Result<FactorTable, Box<dyn Error>> {
    let file = File::open(path.join(file_name))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut entries = Vec::new();

    for result in reader.records() {
        let record = result?;
        let key = record[0].to_string();
        let factor: f64 = record[1].parse()?;
        entries.push((key, factor));
    }

    Ok(FactorTable::from_rows(dimension, entries))
}

/// Load a marginal-rate bracket schedule from CSV
/// Rows: upper_bound,rate — an empty upper bound marks the unbounded final band
pub fn load_marginal_schedule(path: &Path, file_name: &str) -> Result<BracketSchedule, Box<dyn Error>> {
    let bands = load_bands(path, file_name)?;
    let schedule = BracketSchedule::marginal(bands);
    if !schedule.is_well_formed() {
        return Err(format!("{}: bracket bounds must strictly increase", file_name).into());
    }
    Ok(schedule)
}

/// Load a flat-fee bracket schedule from CSV
/// Rows: upper_bound,fee — an empty upper bound marks the unbounded final band
pub fn load_flat_fee_schedule(path: &Path, file_name: &str) -> Result<BracketSchedule, Box<dyn Error>> {
    let bands = load_bands(path, file_name)?;
    let schedule = BracketSchedule::flat_fee(bands);
    if !schedule.is_well_formed() {
        return Err(format!("{}: bracket bounds must strictly increase", file_name).into());
    }
    Ok(schedule)
}

fn load_bands(path: &Path, file_name: &str) -> Result<Vec<(Option<f64>, f64)>, Box<dyn Error>> {
    let file = File::open(path.join(file_name))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut bands = Vec::new();

    for result in reader.records() {
        let record = result?;
        let upper = if record[0].is_empty() {
            None
        } else {
            Some(record[0].parse::<f64>()?)
        };
        let value: f64 = record[1].parse()?;
        bands.push((upper, value));
    }

    Ok(bands)
}

/// All table dimensions loaded from one directory
pub struct LoadedTables {
    pub age_curve: AgeCurve,
    pub provider_factors: FactorTable,
    pub jurisdiction_factors: FactorTable,
    pub income_tax_brackets: BracketSchedule,
    pub transfer_duty_brackets: BracketSchedule,
    pub legal_fee_scale: BracketSchedule,
}

impl LoadedTables {
    /// Load all tables from the default path
    pub fn load_default() -> Result<Self, Box<dyn Error>> {
        Self::load_from(Path::new(DEFAULT_TABLES_PATH))
    }

    /// Load all tables from a specific path
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            age_curve: load_age_curve(path)?,
            provider_factors: load_factor_table(path, "provider_factors.csv", "provider")?,
            jurisdiction_factors: load_factor_table(path, "jurisdiction_factors.csv", "jurisdiction")?,
            income_tax_brackets: load_marginal_schedule(path, "income_tax_brackets.csv")?,
            transfer_duty_brackets: load_marginal_schedule(path, "transfer_duty_brackets.csv")?,
            legal_fee_scale: load_flat_fee_schedule(path, "legal_fee_scale.csv")?,
        })
    }
}
