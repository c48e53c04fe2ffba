//! Named, independently settable input fields
//!
//! Field keys match the configuration form (`ttVIP`, `borKelas1`, `pctBPJS`, ...),
//! so a presentation layer can bind widgets without knowing the struct layout.

use std::fmt;
use std::str::FromStr;

use super::{BedClass, ProjectionInputs};

/// One settable input field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    BaseYear,
    ProjectionYears,
    GrowthRate,
    Beds(BedClass),
    Occupancy(BedClass),
    LengthOfStay(BedClass),
    PrivateTariff(BedClass),
    BpjsShare,
    BpjsTariff,
    LabRate,
    RadiologyRate,
    PharmacyRate,
    ProcedureRate,
}

fn class_suffix(class: BedClass) -> &'static str {
    match class {
        BedClass::Vip => "VIP",
        BedClass::Kelas1 => "Kelas1",
        BedClass::Kelas2 => "Kelas2",
        BedClass::Kelas3 => "Kelas3",
    }
}

impl InputField {
    /// Every field, in form order
    pub fn all() -> Vec<InputField> {
        let mut fields = vec![InputField::BaseYear, InputField::ProjectionYears, InputField::GrowthRate];
        for make in [
            InputField::Beds as fn(BedClass) -> InputField,
            InputField::Occupancy,
            InputField::LengthOfStay,
            InputField::PrivateTariff,
        ] {
            fields.extend(BedClass::ALL.into_iter().map(make));
        }
        fields.extend([
            InputField::BpjsShare,
            InputField::BpjsTariff,
            InputField::LabRate,
            InputField::RadiologyRate,
            InputField::PharmacyRate,
            InputField::ProcedureRate,
        ]);
        fields
    }

    /// Form key for this field
    pub fn key(&self) -> String {
        match self {
            InputField::BaseYear => "baseYear".to_string(),
            InputField::ProjectionYears => "tahunProyeksi".to_string(),
            InputField::GrowthRate => "growthRate".to_string(),
            InputField::Beds(c) => format!("tt{}", class_suffix(*c)),
            InputField::Occupancy(c) => format!("bor{}", class_suffix(*c)),
            InputField::LengthOfStay(c) => format!("alos{}", class_suffix(*c)),
            InputField::PrivateTariff(c) => format!("tarif{}", class_suffix(*c)),
            InputField::BpjsShare => "pctBPJS".to_string(),
            InputField::BpjsTariff => "tarifBPJS".to_string(),
            InputField::LabRate => "pctLab".to_string(),
            InputField::RadiologyRate => "pctRadiologi".to_string(),
            InputField::PharmacyRate => "pctFarmasi".to_string(),
            InputField::ProcedureRate => "pctTindakan".to_string(),
        }
    }

    /// Current value of this field as a real number
    pub fn get(&self, inputs: &ProjectionInputs) -> f64 {
        match self {
            InputField::BaseYear => inputs.base_year as f64,
            InputField::ProjectionYears => inputs.projection_years as f64,
            InputField::GrowthRate => inputs.growth_rate_pct,
            InputField::Beds(c) => inputs.bed_classes.get(*c).beds as f64,
            InputField::Occupancy(c) => inputs.bed_classes.get(*c).target_occupancy_pct,
            InputField::LengthOfStay(c) => inputs.bed_classes.get(*c).alos_days,
            InputField::PrivateTariff(c) => inputs.bed_classes.get(*c).private_tariff_per_day,
            InputField::BpjsShare => inputs.payer_mix.bpjs_share_pct,
            InputField::BpjsTariff => inputs.payer_mix.bpjs_tariff_per_episode,
            InputField::LabRate => inputs.ancillary.lab_pct,
            InputField::RadiologyRate => inputs.ancillary.radiology_pct,
            InputField::PharmacyRate => inputs.ancillary.pharmacy_pct,
            InputField::ProcedureRate => inputs.ancillary.procedure_pct,
        }
    }

    /// Assign a value. Integer fields truncate; counts saturate at zero.
    pub fn set(&self, inputs: &mut ProjectionInputs, value: f64) {
        match self {
            InputField::BaseYear => inputs.base_year = value as i32,
            InputField::ProjectionYears => inputs.projection_years = value as u32,
            InputField::GrowthRate => inputs.growth_rate_pct = value,
            InputField::Beds(c) => inputs.bed_classes.get_mut(*c).beds = value as u32,
            InputField::Occupancy(c) => inputs.bed_classes.get_mut(*c).target_occupancy_pct = value,
            InputField::LengthOfStay(c) => inputs.bed_classes.get_mut(*c).alos_days = value,
            InputField::PrivateTariff(c) => inputs.bed_classes.get_mut(*c).private_tariff_per_day = value,
            InputField::BpjsShare => inputs.payer_mix.bpjs_share_pct = value,
            InputField::BpjsTariff => inputs.payer_mix.bpjs_tariff_per_episode = value,
            InputField::LabRate => inputs.ancillary.lab_pct = value,
            InputField::RadiologyRate => inputs.ancillary.radiology_pct = value,
            InputField::PharmacyRate => inputs.ancillary.pharmacy_pct = value,
            InputField::ProcedureRate => inputs.ancillary.procedure_pct = value,
        }
    }

    /// Assign raw text from an input widget; unparsable text assigns 0
    pub fn set_raw(&self, inputs: &mut ProjectionInputs, raw: &str) {
        self.set(inputs, parse_or_zero(raw));
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for InputField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputField::all()
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| format!("unknown input field: {}", s))
    }
}

/// Parse a number the way the form does: anything unparsable or non-finite is 0
pub fn parse_or_zero(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
