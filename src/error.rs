//! Error types for input validation, loading, and report export

use std::path::PathBuf;
use thiserror::Error;

use crate::inputs::BedClass;

/// Reasons a parameter set cannot be projected meaningfully
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("total bed count is zero; occupancy and per-bed indicators are undefined")]
    NoBeds,

    #[error("{class}: average length of stay must be positive (got {value})")]
    NonPositiveLengthOfStay { class: BedClass, value: f64 },

    #[error("{class}: target occupancy must be within 0-100% (got {value})")]
    OccupancyOutOfRange { class: BedClass, value: f64 },

    #[error("BPJS share must be within 0-100% (got {0})")]
    BpjsShareOutOfRange(f64),

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },

    #[error("projection horizon must be at least one year")]
    EmptyHorizon,

    #[error("projection horizon of {years} years exceeds the maximum of {max}")]
    HorizonTooLong { years: u32, max: u32 },

    #[error("base year {year} is outside {min}-{max} (including the projection horizon)")]
    BaseYearOutOfRange { year: i32, min: i32, max: i32 },
}

/// Failures while reading inputs from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON inputs: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid bed table: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown bed class in bed table: {0:?}")]
    UnknownClass(String),

    #[error("bed table lists {0} more than once")]
    DuplicateClass(BedClass),
}

/// Failures raised while producing a report file
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: projection is empty")]
    EmptyProjection,

    #[error("workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
