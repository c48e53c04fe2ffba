//! ABK Financial Intelligence - hospital inpatient revenue projection
//!
//! This library provides:
//! - Year-by-year revenue projection per bed class (VIP, Kelas 1-3) with BPJS/private payer mix
//! - Ancillary revenue (laboratory, radiology, pharmacy, procedures) as shares of inpatient revenue
//! - Hospital performance indicators (BOR, ALOS, BTO, TOI, revenue per bed) against ideal ranges
//! - Excel workbook, PDF, and CSV report export
//! - Scenario comparison over growth rates, payer mix, and horizons

pub mod error;
pub mod export;
pub mod format;
pub mod inputs;
pub mod projection;
pub mod scenario;
pub mod session;

// Re-export commonly used types
pub use error::{ExportError, InputError, LoadError};
pub use inputs::{BedClass, InputField, ProjectionInputs};
pub use projection::{project, ProjectionEngine, ProjectionSummary, YearProjection};
pub use scenario::ScenarioRunner;
pub use session::ProjectionSession;
