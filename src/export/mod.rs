//! Report exporters
//!
//! Exporters consume a finished projection plus the inputs that produced it and
//! write a file. They never modify the projection. Failures are caught at
//! [`export_with_notice`] and turned into a message for the user.

mod pdf;
mod summary_csv;
pub mod tables;
mod workbook;

pub use pdf::PdfReportExporter;
pub use summary_csv::CsvSummaryExporter;
pub use workbook::WorkbookExporter;

use std::fs;
use std::path::Path;

use log::{error, info};
use serde::Serialize;

use crate::error::ExportError;
use crate::inputs::ProjectionInputs;
use crate::projection::YearProjection;

/// A report format that can be rendered from a projection
pub trait ReportExporter {
    /// Short human-readable format name
    fn format_name(&self) -> &'static str;

    /// File name used when the caller does not pick one
    fn default_file_name(&self) -> &'static str;

    /// Render the report into memory
    fn render(&self, years: &[YearProjection], inputs: &ProjectionInputs) -> Result<Vec<u8>, ExportError>;

    /// Render the report and write it to `path`
    fn export(&self, years: &[YearProjection], inputs: &ProjectionInputs, path: &Path) -> Result<(), ExportError> {
        if years.is_empty() {
            return Err(ExportError::EmptyProjection);
        }
        let bytes = self.render(years, inputs)?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

/// Outcome of an export, as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportNotice {
    pub success: bool,
    pub message: String,
}

/// Run an export and report the outcome instead of propagating the error
pub fn export_with_notice(
    exporter: &dyn ReportExporter,
    years: &[YearProjection],
    inputs: &ProjectionInputs,
    path: &Path,
) -> ExportNotice {
    match exporter.export(years, inputs, path) {
        Ok(()) => {
            info!("{} report written to {}", exporter.format_name(), path.display());
            ExportNotice {
                success: true,
                message: format!("Laporan {} berhasil disimpan: {}", exporter.format_name(), path.display()),
            }
        }
        Err(e) => {
            error!("{} export to {} failed: {}", exporter.format_name(), path.display(), e);
            ExportNotice {
                success: false,
                message: format!("Gagal mengekspor laporan {}: {}", exporter.format_name(), e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project;

    #[test]
    fn test_notice_on_success() {
        let inputs = ProjectionInputs::with_base_year(2025);
        let years = project(&inputs);
        let path = std::env::temp_dir().join("abk_notice_test.csv");

        let notice = export_with_notice(&CsvSummaryExporter, &years, &inputs, &path);
        assert!(notice.success, "{}", notice.message);
        assert!(path.exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_notice_on_failure_leaves_projection_untouched() {
        let inputs = ProjectionInputs::with_base_year(2025);
        let years = project(&inputs);
        let before = years.clone();
        let path = Path::new("/nonexistent-dir/abk/report.csv");

        let notice = export_with_notice(&CsvSummaryExporter, &years, &inputs, path);
        assert!(!notice.success);
        assert!(notice.message.starts_with("Gagal"));
        assert_eq!(years, before);
    }

    #[test]
    fn test_empty_projection_is_rejected() {
        let inputs = ProjectionInputs::with_base_year(2025);
        let path = std::env::temp_dir().join("abk_empty.xlsx");
        let result = WorkbookExporter.export(&[], &inputs, &path);
        assert!(matches!(result, Err(ExportError::EmptyProjection)));
    }
}
