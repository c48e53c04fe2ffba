//! Report tables shared by the workbook, PDF, and CSV exporters

use serde::Serialize;

use crate::format::{format_num, format_rupiah};
use crate::projection::{assess, YearProjection};

pub const SUMMARY_SHEET: &str = "Ringkasan";

/// One row of the year-by-year summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Tahun")]
    pub year: String,
    #[serde(rename = "Pendapatan Rawat Inap")]
    pub inpatient_revenue: f64,
    #[serde(rename = "Pendapatan Penunjang")]
    pub ancillary_revenue: f64,
    #[serde(rename = "TOTAL PENDAPATAN")]
    pub total_revenue: f64,
    #[serde(rename = "Pertumbuhan (%)")]
    pub growth_pct: f64,
    #[serde(rename = "BOR (%)")]
    pub occupancy_rate: f64,
    #[serde(rename = "ALOS (hari)")]
    pub average_length_of_stay: f64,
    #[serde(rename = "Jumlah Pasien")]
    pub total_patients: f64,
}

pub const SUMMARY_HEADERS: [&str; 8] = [
    "Tahun",
    "Pendapatan Rawat Inap",
    "Pendapatan Penunjang",
    "TOTAL PENDAPATAN",
    "Pertumbuhan (%)",
    "BOR (%)",
    "ALOS (hari)",
    "Jumlah Pasien",
];

pub fn summary_rows(years: &[YearProjection]) -> Vec<SummaryRow> {
    years
        .iter()
        .map(|y| SummaryRow {
            year: y.year_label.clone(),
            inpatient_revenue: y.inpatient_revenue,
            ancillary_revenue: y.ancillary.total,
            total_revenue: y.total_revenue,
            growth_pct: y.revenue_growth_pct,
            occupancy_rate: y.indicators.occupancy_rate,
            average_length_of_stay: y.indicators.average_length_of_stay,
            total_patients: y.indicators.total_patients,
        })
        .collect()
}

/// Name of the per-year detail sheet
pub fn detail_sheet_name(year: &YearProjection) -> String {
    format!("Detail {}", year.calendar_year)
}

/// Every sheet of the workbook, in order
pub fn sheet_names(years: &[YearProjection]) -> Vec<String> {
    std::iter::once(SUMMARY_SHEET.to_string())
        .chain(years.iter().map(detail_sheet_name))
        .collect()
}

pub const CLASS_HEADERS: [&str; 6] = ["Kelas", "Tempat Tidur", "BOR Target", "Hari Rawat", "Jumlah Pasien", "Pendapatan"];

/// Per-class rows formatted for display
pub fn class_rows_display(year: &YearProjection) -> Vec<Vec<String>> {
    year.class_details
        .iter()
        .map(|d| {
            vec![
                d.class_name.clone(),
                d.beds.to_string(),
                format!("{}%", format_num(d.target_occupancy_pct)),
                format_num(d.display_patient_days),
                format_num(d.display_patient_count),
                format_rupiah(d.revenue),
            ]
        })
        .collect()
}

/// Ancillary breakdown plus its total, formatted for display
pub fn ancillary_rows_display(year: &YearProjection) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = year
        .ancillary
        .components()
        .iter()
        .map(|(label, value)| vec![label.to_string(), format_rupiah(*value)])
        .collect();
    rows.push(vec!["Total Penunjang".to_string(), format_rupiah(year.ancillary.total)]);
    rows
}

pub const INDICATOR_HEADERS: [&str; 4] = ["Indikator", "Nilai", "Rentang Ideal", "Status"];

/// Indicator table comparing each KPI with its ideal range
pub fn indicator_rows_display(year: &YearProjection) -> Vec<Vec<String>> {
    use crate::projection::Kpi;

    assess(&year.indicators)
        .into_iter()
        .map(|a| {
            let value = match a.kpi {
                Kpi::OccupancyRate => format!("{}%", format_num(a.value)),
                Kpi::BedTurnover => format!("{}x", format_num(a.value)),
                Kpi::RevenuePerBed => format_rupiah(a.value),
                Kpi::AverageLengthOfStay | Kpi::TurnoverInterval => format_num(a.value),
            };
            vec![
                a.kpi.label().to_string(),
                value,
                a.kpi.ideal_range_label(),
                a.status.label().to_string(),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::ProjectionInputs;
    use crate::projection::project;

    fn years() -> Vec<YearProjection> {
        project(&ProjectionInputs::with_base_year(2025))
    }

    #[test]
    fn test_sheet_names() {
        assert_eq!(
            sheet_names(&years()),
            vec!["Ringkasan", "Detail 2025", "Detail 2026", "Detail 2027", "Detail 2028"]
        );
    }

    #[test]
    fn test_summary_rows_follow_projection() {
        let years = years();
        let rows = summary_rows(&years);
        assert_eq!(rows.len(), years.len());
        assert_eq!(rows[0].year, "2025 (Dasar)");
        assert_eq!(rows[0].growth_pct, 0.0);
        assert_eq!(rows[2].total_revenue, years[2].total_revenue);
    }

    #[test]
    fn test_display_rows() {
        let years = years();
        let classes = class_rows_display(&years[0]);
        assert_eq!(classes.len(), 4);
        assert_eq!(classes[0], vec!["VIP", "10", "60%", "2.190", "548", "Rp 2.929.125.000"]);

        let ancillary = ancillary_rows_display(&years[0]);
        assert_eq!(ancillary.len(), 5);
        assert_eq!(ancillary[4][0], "Total Penunjang");

        let indicators = indicator_rows_display(&years[0]);
        assert_eq!(indicators.len(), 5);
        assert_eq!(indicators[0], vec!["Bed Occupancy (BOR)", "74,5%", "60-85%", "Ideal"]);
    }
}
