//! Load projection inputs from JSON documents and CSV bed tables

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use csv::Reader;
use log::debug;
use serde::Deserialize;

use super::{BedClass, BedClassParams, BedClassTable, ProjectionInputs};
use crate::error::LoadError;

/// Parse inputs from JSON text. Missing keys keep their default values.
pub fn parse_inputs_json(text: &str) -> Result<ProjectionInputs, LoadError> {
    Ok(serde_json::from_str(text)?)
}

/// Load inputs from a JSON file
pub fn load_inputs_json<P: AsRef<Path>>(path: P) -> Result<ProjectionInputs, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let inputs = parse_inputs_json(&text)?;
    debug!("Loaded inputs from {}", path.display());
    Ok(inputs)
}

/// Raw CSV row of a bed table
#[derive(Debug, Deserialize)]
struct BedRow {
    #[serde(rename = "Kelas")]
    class: String,
    #[serde(rename = "TT")]
    beds: u32,
    #[serde(rename = "BOR")]
    occupancy_pct: f64,
    #[serde(rename = "ALOS")]
    alos_days: f64,
    #[serde(rename = "Tarif")]
    tariff: f64,
}

/// Read a bed table (`Kelas,TT,BOR,ALOS,Tarif`) from any reader.
///
/// Classes not listed keep their value from `base`.
pub fn read_bed_table<R: std::io::Read>(reader: R, base: &BedClassTable) -> Result<BedClassTable, LoadError> {
    let mut reader = Reader::from_reader(reader);
    let mut table = base.clone();
    let mut seen = HashSet::new();

    for result in reader.deserialize() {
        let row: BedRow = result?;
        let class = BedClass::from_label(&row.class).ok_or_else(|| LoadError::UnknownClass(row.class.clone()))?;
        if !seen.insert(class) {
            return Err(LoadError::DuplicateClass(class));
        }
        *table.get_mut(class) = BedClassParams::new(row.beds, row.occupancy_pct, row.alos_days, row.tariff);
    }

    Ok(table)
}

/// Load a bed table from a CSV file
pub fn load_bed_table<P: AsRef<Path>>(path: P, base: &BedClassTable) -> Result<BedClassTable, LoadError> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_bed_table(file, base)?;
    debug!("Loaded bed table from {}", path.display());
    Ok(table)
}
