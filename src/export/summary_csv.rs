//! Flat CSV of the yearly summary

use csv::Writer;

use super::tables::summary_rows;
use super::ReportExporter;
use crate::error::ExportError;
use crate::inputs::ProjectionInputs;
use crate::projection::YearProjection;

/// Writes the summary table as CSV, numbers unformatted
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSummaryExporter;

impl ReportExporter for CsvSummaryExporter {
    fn format_name(&self) -> &'static str {
        "CSV"
    }

    fn default_file_name(&self) -> &'static str {
        "ABK_Ringkasan.csv"
    }

    fn render(&self, years: &[YearProjection], _inputs: &ProjectionInputs) -> Result<Vec<u8>, ExportError> {
        let mut writer = Writer::from_writer(Vec::new());
        for row in summary_rows(years) {
            writer.serialize(row)?;
        }
        writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
    }
}
