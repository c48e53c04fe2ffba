//! Projection parameters: bed capacity, occupancy targets, tariffs, and payer mix

mod field;
pub mod loader;

pub use field::{parse_or_zero, InputField};
pub use loader::{load_bed_table, load_inputs_json};

use std::fmt;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Days in a projection year
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Longest accepted projection horizon, in years after the base year
pub const MAX_PROJECTION_YEARS: u32 = 100;

/// Accepted calendar years for every projected year
pub const MIN_CALENDAR_YEAR: i32 = 1900;
pub const MAX_CALENDAR_YEAR: i32 = 9999;

/// Inpatient bed class, always processed in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BedClass {
    #[serde(rename = "VIP")]
    Vip,
    #[serde(rename = "Kelas 1")]
    Kelas1,
    #[serde(rename = "Kelas 2")]
    Kelas2,
    #[serde(rename = "Kelas 3")]
    Kelas3,
}

impl BedClass {
    pub const ALL: [BedClass; 4] = [BedClass::Vip, BedClass::Kelas1, BedClass::Kelas2, BedClass::Kelas3];

    /// Name shown in tables and reports
    pub fn display_name(self) -> &'static str {
        match self {
            BedClass::Vip => "VIP",
            BedClass::Kelas1 => "Kelas 1",
            BedClass::Kelas2 => "Kelas 2",
            BedClass::Kelas3 => "Kelas 3",
        }
    }

    /// Parse a class name as written in bed tables ("VIP", "Kelas 1", "kelas1", "1", ...)
    pub fn from_label(label: &str) -> Option<BedClass> {
        let normalized: String = label
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "vip" => Some(BedClass::Vip),
            "kelas1" | "class1" | "1" => Some(BedClass::Kelas1),
            "kelas2" | "class2" | "2" => Some(BedClass::Kelas2),
            "kelas3" | "class3" | "3" => Some(BedClass::Kelas3),
            _ => None,
        }
    }
}

impl fmt::Display for BedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Capacity and tariff parameters for one bed class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedClassParams {
    /// Number of beds (TT)
    pub beds: u32,

    /// Target bed occupancy rate, percent
    pub target_occupancy_pct: f64,

    /// Average length of stay per episode, days
    pub alos_days: f64,

    /// Private ("umum") tariff per inpatient day
    pub private_tariff_per_day: f64,
}

impl BedClassParams {
    pub fn new(beds: u32, target_occupancy_pct: f64, alos_days: f64, private_tariff_per_day: f64) -> Self {
        Self {
            beds,
            target_occupancy_pct,
            alos_days,
            private_tariff_per_day,
        }
    }
}

/// Parameters for the four bed classes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BedClassTable {
    pub vip: BedClassParams,
    pub kelas1: BedClassParams,
    pub kelas2: BedClassParams,
    pub kelas3: BedClassParams,
}

impl BedClassTable {
    pub fn get(&self, class: BedClass) -> &BedClassParams {
        match class {
            BedClass::Vip => &self.vip,
            BedClass::Kelas1 => &self.kelas1,
            BedClass::Kelas2 => &self.kelas2,
            BedClass::Kelas3 => &self.kelas3,
        }
    }

    pub fn get_mut(&mut self, class: BedClass) -> &mut BedClassParams {
        match class {
            BedClass::Vip => &mut self.vip,
            BedClass::Kelas1 => &mut self.kelas1,
            BedClass::Kelas2 => &mut self.kelas2,
            BedClass::Kelas3 => &mut self.kelas3,
        }
    }

    /// Iterate classes in fixed order (VIP, Kelas 1, Kelas 2, Kelas 3)
    pub fn iter(&self) -> impl Iterator<Item = (BedClass, &BedClassParams)> + '_ {
        BedClass::ALL.into_iter().map(move |class| (class, self.get(class)))
    }

    pub fn total_beds(&self) -> u32 {
        self.iter().map(|(_, p)| p.beds).sum()
    }
}

impl Default for BedClassTable {
    fn default() -> Self {
        Self {
            vip: BedClassParams::new(10, 60.0, 4.0, 1_500_000.0),
            kelas1: BedClassParams::new(20, 70.0, 4.0, 800_000.0),
            kelas2: BedClassParams::new(30, 75.0, 5.0, 500_000.0),
            kelas3: BedClassParams::new(40, 80.0, 5.0, 300_000.0),
        }
    }
}

/// Split between the BPJS flat-tariff channel and private per-day billing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PayerMix {
    /// Share of patients covered by BPJS, percent
    pub bpjs_share_pct: f64,

    /// BPJS payment per episode, independent of length of stay
    pub bpjs_tariff_per_episode: f64,
}

impl Default for PayerMix {
    fn default() -> Self {
        Self {
            bpjs_share_pct: 65.0,
            bpjs_tariff_per_episode: 5_000_000.0,
        }
    }
}

/// Ancillary revenue rates, each a percent of inpatient revenue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AncillaryRates {
    pub lab_pct: f64,
    pub radiology_pct: f64,
    pub pharmacy_pct: f64,
    pub procedure_pct: f64,
}

impl Default for AncillaryRates {
    fn default() -> Self {
        Self {
            lab_pct: 15.0,
            radiology_pct: 10.0,
            pharmacy_pct: 25.0,
            procedure_pct: 20.0,
        }
    }
}

/// Complete parameter set for one projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectionInputs {
    /// Calendar year of projection year 0
    pub base_year: i32,

    /// Number of years projected after the base year
    pub projection_years: u32,

    /// Annual compound growth applied to volumes and revenue, percent
    pub growth_rate_pct: f64,

    pub bed_classes: BedClassTable,
    pub payer_mix: PayerMix,
    pub ancillary: AncillaryRates,
}

impl Default for ProjectionInputs {
    fn default() -> Self {
        Self {
            base_year: chrono::Local::now().year(),
            projection_years: 3,
            growth_rate_pct: 8.0,
            bed_classes: BedClassTable::default(),
            payer_mix: PayerMix::default(),
            ancillary: AncillaryRates::default(),
        }
    }
}

impl ProjectionInputs {
    /// Default parameters anchored at a fixed base year
    pub fn with_base_year(base_year: i32) -> Self {
        Self {
            base_year,
            ..Default::default()
        }
    }

    pub fn total_beds(&self) -> u32 {
        self.bed_classes.total_beds()
    }

    /// Check the constraints the engine assumes but does not enforce
    pub fn validate(&self) -> Result<(), InputError> {
        if self.projection_years < 1 {
            return Err(InputError::EmptyHorizon);
        }
        if self.projection_years > MAX_PROJECTION_YEARS {
            return Err(InputError::HorizonTooLong {
                years: self.projection_years,
                max: MAX_PROJECTION_YEARS,
            });
        }
        // horizon is capped above, so the last year cannot overflow
        let last_year = self.base_year.checked_add(self.projection_years as i32);
        let in_range = |y: i32| (MIN_CALENDAR_YEAR..=MAX_CALENDAR_YEAR).contains(&y);
        if !in_range(self.base_year) || !last_year.is_some_and(in_range) {
            return Err(InputError::BaseYearOutOfRange {
                year: self.base_year,
                min: MIN_CALENDAR_YEAR,
                max: MAX_CALENDAR_YEAR,
            });
        }
        check_finite("growth rate", self.growth_rate_pct)?;

        for (class, params) in self.bed_classes.iter() {
            check_finite("target occupancy", params.target_occupancy_pct)?;
            check_finite("length of stay", params.alos_days)?;
            check_finite("private tariff", params.private_tariff_per_day)?;

            if !(0.0..=100.0).contains(&params.target_occupancy_pct) {
                return Err(InputError::OccupancyOutOfRange {
                    class,
                    value: params.target_occupancy_pct,
                });
            }
            if params.alos_days <= 0.0 {
                return Err(InputError::NonPositiveLengthOfStay {
                    class,
                    value: params.alos_days,
                });
            }
            check_non_negative("private tariff", params.private_tariff_per_day)?;
        }
        if self.total_beds() == 0 {
            return Err(InputError::NoBeds);
        }

        let mix = &self.payer_mix;
        check_finite("BPJS share", mix.bpjs_share_pct)?;
        if !(0.0..=100.0).contains(&mix.bpjs_share_pct) {
            return Err(InputError::BpjsShareOutOfRange(mix.bpjs_share_pct));
        }
        check_non_negative("BPJS tariff", mix.bpjs_tariff_per_episode)?;

        let rates = &self.ancillary;
        check_non_negative("laboratory rate", rates.lab_pct)?;
        check_non_negative("radiology rate", rates.radiology_pct)?;
        check_non_negative("pharmacy rate", rates.pharmacy_pct)?;
        check_non_negative("procedure rate", rates.procedure_pct)?;

        Ok(())
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InputError::NotFinite { field })
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), InputError> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(InputError::Negative { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_form() {
        let inputs = ProjectionInputs::with_base_year(2025);
        assert_eq!(inputs.total_beds(), 100);
        assert_eq!(inputs.projection_years, 3);
        assert_eq!(inputs.bed_classes.kelas2.target_occupancy_pct, 75.0);
        assert_eq!(inputs.bed_classes.kelas3.private_tariff_per_day, 300_000.0);
        assert_eq!(inputs.payer_mix.bpjs_share_pct, 65.0);
        assert_eq!(inputs.ancillary.procedure_pct, 20.0);
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_class_order_is_fixed() {
        let table = BedClassTable::default();
        let names: Vec<_> = table.iter().map(|(c, _)| c.display_name()).collect();
        assert_eq!(names, vec!["VIP", "Kelas 1", "Kelas 2", "Kelas 3"]);
    }

    #[test]
    fn test_from_label() {
        assert_eq!(BedClass::from_label("VIP"), Some(BedClass::Vip));
        assert_eq!(BedClass::from_label("Kelas 2"), Some(BedClass::Kelas2));
        assert_eq!(BedClass::from_label("kelas_3"), Some(BedClass::Kelas3));
        assert_eq!(BedClass::from_label("ICU"), None);
    }

    #[test]
    fn test_validate_rejects_zero_beds() {
        let mut inputs = ProjectionInputs::with_base_year(2025);
        for class in BedClass::ALL {
            inputs.bed_classes.get_mut(class).beds = 0;
        }
        assert_eq!(inputs.validate(), Err(InputError::NoBeds));
    }

    #[test]
    fn test_validate_rejects_zero_alos() {
        let mut inputs = ProjectionInputs::with_base_year(2025);
        inputs.bed_classes.kelas1.alos_days = 0.0;
        assert!(matches!(
            inputs.validate(),
            Err(InputError::NonPositiveLengthOfStay { class: BedClass::Kelas1, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_percentages() {
        let mut inputs = ProjectionInputs::with_base_year(2025);
        inputs.bed_classes.vip.target_occupancy_pct = 120.0;
        assert!(matches!(inputs.validate(), Err(InputError::OccupancyOutOfRange { .. })));

        let mut inputs = ProjectionInputs::with_base_year(2025);
        inputs.payer_mix.bpjs_share_pct = -1.0;
        assert_eq!(inputs.validate(), Err(InputError::BpjsShareOutOfRange(-1.0)));

        let mut inputs = ProjectionInputs::with_base_year(2025);
        inputs.ancillary.pharmacy_pct = f64::NAN;
        assert_eq!(
            inputs.validate(),
            Err(InputError::NotFinite { field: "pharmacy rate" })
        );
    }

    #[test]
    fn test_validate_rejects_empty_horizon() {
        let mut inputs = ProjectionInputs::with_base_year(2025);
        inputs.projection_years = 0;
        assert_eq!(inputs.validate(), Err(InputError::EmptyHorizon));
    }

    #[test]
    fn test_validate_rejects_overlong_horizon() {
        let mut inputs = ProjectionInputs::with_base_year(2025);
        inputs.projection_years = u32::MAX;
        assert_eq!(
            inputs.validate(),
            Err(InputError::HorizonTooLong { years: u32::MAX, max: MAX_PROJECTION_YEARS })
        );

        inputs.projection_years = MAX_PROJECTION_YEARS;
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_base_year_out_of_range() {
        let inputs = ProjectionInputs::with_base_year(i32::MAX);
        assert!(matches!(inputs.validate(), Err(InputError::BaseYearOutOfRange { year: i32::MAX, .. })));

        // the last projected year must also fit
        let mut inputs = ProjectionInputs::with_base_year(MAX_CALENDAR_YEAR - 2);
        assert!(matches!(inputs.validate(), Err(InputError::BaseYearOutOfRange { .. })));
        inputs.projection_years = 2;
        assert!(inputs.validate().is_ok());

        assert!(ProjectionInputs::with_base_year(1000).validate().is_err());
    }

    #[test]
    fn test_huge_base_year_from_form_text_is_rejected() {
        let mut inputs = ProjectionInputs::with_base_year(2025);
        InputField::BaseYear.set_raw(&mut inputs, "1e12");
        assert_eq!(inputs.base_year, i32::MAX);
        assert!(matches!(inputs.validate(), Err(InputError::BaseYearOutOfRange { .. })));
    }
}
