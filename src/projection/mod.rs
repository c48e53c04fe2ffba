//! Projection engine and its output records

mod engine;
pub mod indicators;
mod results;

pub use engine::{project, ProjectionEngine};
pub use indicators::{assess, Kpi, KpiAssessment, KpiStatus};
pub use results::{year_label, AncillaryRevenue, ClassDetail, Indicators, ProjectionSummary, YearProjection};
