//! Benchmark ranges for hospital performance indicators

use serde::{Deserialize, Serialize};

use super::results::Indicators;

/// A reported performance indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kpi {
    OccupancyRate,
    AverageLengthOfStay,
    BedTurnover,
    TurnoverInterval,
    RevenuePerBed,
}

/// Where a value sits relative to its ideal range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KpiStatus {
    Ideal,
    BelowIdeal,
    AboveIdeal,
    /// No ideal range defined
    Informational,
}

impl KpiStatus {
    pub fn label(self) -> &'static str {
        match self {
            KpiStatus::Ideal => "Ideal",
            KpiStatus::BelowIdeal => "Di bawah ideal",
            KpiStatus::AboveIdeal => "Di atas ideal",
            KpiStatus::Informational => "-",
        }
    }

    pub fn is_ok(self) -> bool {
        !matches!(self, KpiStatus::BelowIdeal | KpiStatus::AboveIdeal)
    }
}

impl Kpi {
    pub const ALL: [Kpi; 5] = [
        Kpi::OccupancyRate,
        Kpi::AverageLengthOfStay,
        Kpi::BedTurnover,
        Kpi::TurnoverInterval,
        Kpi::RevenuePerBed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Kpi::OccupancyRate => "Bed Occupancy (BOR)",
            Kpi::AverageLengthOfStay => "ALOS (Hari)",
            Kpi::BedTurnover => "Bed Turnover (BTO)",
            Kpi::TurnoverInterval => "Turnover Interval (TOI)",
            Kpi::RevenuePerBed => "Rev/Bed",
        }
    }

    pub fn value(self, indicators: &Indicators) -> f64 {
        match self {
            Kpi::OccupancyRate => indicators.occupancy_rate,
            Kpi::AverageLengthOfStay => indicators.average_length_of_stay,
            Kpi::BedTurnover => indicators.bed_turnover,
            Kpi::TurnoverInterval => indicators.turnover_interval,
            Kpi::RevenuePerBed => indicators.revenue_per_bed,
        }
    }

    /// Ideal (min, max) range, inclusive
    pub fn ideal_range(self) -> Option<(f64, f64)> {
        match self {
            Kpi::OccupancyRate => Some((60.0, 85.0)),
            Kpi::AverageLengthOfStay => Some((3.0, 6.0)),
            Kpi::BedTurnover => Some((40.0, 50.0)),
            Kpi::TurnoverInterval => Some((1.0, 3.0)),
            Kpi::RevenuePerBed => None,
        }
    }

    /// Ideal range as shown in reports
    pub fn ideal_range_label(self) -> String {
        match (self, self.ideal_range()) {
            (Kpi::OccupancyRate, Some((lo, hi))) => format!("{}-{}%", lo, hi),
            (Kpi::BedTurnover, Some((lo, hi))) => format!("{}-{} kali", lo, hi),
            (_, Some((lo, hi))) => format!("{}-{} hari", lo, hi),
            (_, None) => "-".to_string(),
        }
    }

    pub fn status(self, value: f64) -> KpiStatus {
        match self.ideal_range() {
            None => KpiStatus::Informational,
            Some((lo, _)) if value < lo => KpiStatus::BelowIdeal,
            Some((_, hi)) if value > hi => KpiStatus::AboveIdeal,
            // NaN compares false on both bounds
            Some(_) if value.is_nan() => KpiStatus::BelowIdeal,
            Some(_) => KpiStatus::Ideal,
        }
    }
}

/// One indicator checked against its ideal range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiAssessment {
    pub kpi: Kpi,
    pub value: f64,
    pub status: KpiStatus,
}

/// Check every indicator of a year against its ideal range
pub fn assess(indicators: &Indicators) -> Vec<KpiAssessment> {
    Kpi::ALL
        .iter()
        .map(|&kpi| {
            let value = kpi.value(indicators);
            KpiAssessment {
                kpi,
                value,
                status: kpi.status(value),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicators() -> Indicators {
        Indicators {
            occupancy_rate: 74.5,
            average_length_of_stay: 4.69,
            bed_turnover: 58.0,
            turnover_interval: 1.6,
            revenue_per_bed: 409_793_712.5,
            total_patients: 5803.5,
        }
    }

    #[test]
    fn test_status_against_range() {
        assert_eq!(Kpi::OccupancyRate.status(59.9), KpiStatus::BelowIdeal);
        assert_eq!(Kpi::OccupancyRate.status(60.0), KpiStatus::Ideal);
        assert_eq!(Kpi::OccupancyRate.status(90.0), KpiStatus::AboveIdeal);
        assert_eq!(Kpi::AverageLengthOfStay.status(6.0), KpiStatus::Ideal);
        assert_eq!(Kpi::RevenuePerBed.status(1.0), KpiStatus::Informational);
        assert_eq!(Kpi::TurnoverInterval.status(f64::NAN), KpiStatus::BelowIdeal);
    }

    #[test]
    fn test_assess_default_year() {
        let results = assess(&indicators());
        assert_eq!(results.len(), 5);

        let bto = results.iter().find(|a| a.kpi == Kpi::BedTurnover).unwrap();
        assert_eq!(bto.status, KpiStatus::AboveIdeal);
        assert!(!bto.status.is_ok());

        let bor = results.iter().find(|a| a.kpi == Kpi::OccupancyRate).unwrap();
        assert_eq!(bor.value, 74.5);
        assert!(bor.status.is_ok());
    }

    #[test]
    fn test_range_labels() {
        assert_eq!(Kpi::OccupancyRate.ideal_range_label(), "60-85%");
        assert_eq!(Kpi::AverageLengthOfStay.ideal_range_label(), "3-6 hari");
        assert_eq!(Kpi::BedTurnover.ideal_range_label(), "40-50 kali");
        assert_eq!(Kpi::RevenuePerBed.ideal_range_label(), "-");
    }
}
