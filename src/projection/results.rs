//! Output records of a projection run

use serde::{Deserialize, Serialize};

use crate::inputs::{AncillaryRates, BedClass};

/// Per-class figures for one projected year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDetail {
    pub class: BedClass,
    pub class_name: String,
    pub beds: u32,
    pub target_occupancy_pct: f64,

    /// Occupied bed-days at target occupancy (not escalated)
    pub patient_days_occupied: f64,

    /// Patient episodes at target occupancy (not escalated)
    pub patient_count: f64,

    /// Escalated bed-days rounded for display ("hari rawat")
    pub display_patient_days: f64,

    /// Escalated patient episodes rounded for display ("jumlah pasien")
    pub display_patient_count: f64,

    pub bpjs_patients: f64,
    pub private_patients: f64,

    // Escalated revenue split by payer channel
    pub bpjs_revenue: f64,
    pub private_revenue: f64,

    /// Escalated inpatient revenue of the class
    pub revenue: f64,
}

/// Laboratory, radiology, pharmacy, and procedure revenue derived from inpatient revenue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AncillaryRevenue {
    pub laboratory: f64,
    pub radiology: f64,
    pub pharmacy: f64,
    pub procedure: f64,
    pub total: f64,
}

impl AncillaryRevenue {
    pub fn from_inpatient(inpatient_revenue: f64, rates: &AncillaryRates) -> Self {
        let laboratory = inpatient_revenue * (rates.lab_pct / 100.0);
        let radiology = inpatient_revenue * (rates.radiology_pct / 100.0);
        let pharmacy = inpatient_revenue * (rates.pharmacy_pct / 100.0);
        let procedure = inpatient_revenue * (rates.procedure_pct / 100.0);

        Self {
            laboratory,
            radiology,
            pharmacy,
            procedure,
            total: laboratory + radiology + pharmacy + procedure,
        }
    }

    /// Labelled sub-components in report order
    pub fn components(&self) -> [(&'static str, f64); 4] {
        [
            ("Laboratorium", self.laboratory),
            ("Radiologi", self.radiology),
            ("Farmasi", self.pharmacy),
            ("Tindakan", self.procedure),
        ]
    }
}

/// Hospital performance indicators for one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    /// BOR, percent
    pub occupancy_rate: f64,

    /// ALOS, days per episode
    pub average_length_of_stay: f64,

    /// BTO, patients per bed per year
    pub bed_turnover: f64,

    /// TOI, idle days per bed between discharges
    pub turnover_interval: f64,

    pub revenue_per_bed: f64,

    /// Escalated patient episodes across all classes
    pub total_patients: f64,
}

/// Projection record for a single year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearProjection {
    /// 0 for the base year
    pub year_index: u32,
    pub year_label: String,
    pub calendar_year: i32,
    pub growth_factor: f64,
    pub class_details: Vec<ClassDetail>,
    pub inpatient_revenue: f64,
    pub ancillary: AncillaryRevenue,
    pub total_revenue: f64,

    /// Change in total revenue against the previous year, percent (0 for year 0)
    pub revenue_growth_pct: f64,
    pub indicators: Indicators,
}

impl YearProjection {
    pub fn is_base_year(&self) -> bool {
        self.year_index == 0
    }

    pub fn class_detail(&self, class: BedClass) -> Option<&ClassDetail> {
        self.class_details.iter().find(|d| d.class == class)
    }
}

/// Label shown for a projected year
pub fn year_label(calendar_year: i32, year_index: u32) -> String {
    if year_index == 0 {
        format!("{} (Dasar)", calendar_year)
    } else {
        calendar_year.to_string()
    }
}

/// Summary statistics over a complete projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub first_year: i32,
    pub last_year: i32,
    pub base_total_revenue: f64,
    pub final_total_revenue: f64,
    pub cumulative_revenue: f64,
    pub cumulative_patients: f64,

    /// Compound annual growth of total revenue from base to final year, percent
    pub revenue_cagr_pct: f64,
}

impl ProjectionSummary {
    pub fn from_years(years: &[YearProjection]) -> Self {
        let first = years.first();
        let last = years.last();
        let base_total_revenue = first.map(|y| y.total_revenue).unwrap_or(0.0);
        let final_total_revenue = last.map(|y| y.total_revenue).unwrap_or(0.0);
        let span = last.map(|y| y.year_index).unwrap_or(0);

        let revenue_cagr_pct = if span > 0 && base_total_revenue > 0.0 {
            ((final_total_revenue / base_total_revenue).powf(1.0 / span as f64) - 1.0) * 100.0
        } else {
            0.0
        };

        Self {
            total_years: years.len() as u32,
            first_year: first.map(|y| y.calendar_year).unwrap_or(0),
            last_year: last.map(|y| y.calendar_year).unwrap_or(0),
            base_total_revenue,
            final_total_revenue,
            cumulative_revenue: years.iter().map(|y| y.total_revenue).sum(),
            cumulative_patients: years.iter().map(|y| y.indicators.total_patients).sum(),
            revenue_cagr_pct,
        }
    }
}
