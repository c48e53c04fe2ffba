//! Year-by-year inpatient revenue projection

use log::{debug, warn};

use super::results::{year_label, AncillaryRevenue, ClassDetail, Indicators, YearProjection};
use crate::inputs::{BedClass, BedClassParams, ProjectionInputs, DAYS_PER_YEAR};

/// Projection engine over a fixed parameter set
///
/// The engine does not validate its inputs. Zero total beds or a zero length of
/// stay propagate as NaN/infinite figures; call [`ProjectionInputs::validate`] first.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    inputs: ProjectionInputs,
}

/// Unescalated volume and escalated revenue of one class in one year
struct ClassVolume {
    detail: ClassDetail,
    patient_days: f64,
    patients: f64,
}

impl ProjectionEngine {
    pub fn new(inputs: ProjectionInputs) -> Self {
        Self { inputs }
    }

    pub fn inputs(&self) -> &ProjectionInputs {
        &self.inputs
    }

    /// Project the base year plus `projection_years` escalated years
    pub fn project(&self) -> Vec<YearProjection> {
        if self.inputs.total_beds() == 0 {
            warn!("Projecting with zero beds; indicators will not be finite");
        }

        let mut years = Vec::with_capacity(self.inputs.projection_years as usize + 1);
        let mut previous_total_revenue = 0.0;

        for year_index in 0..=self.inputs.projection_years {
            let mut year = self.project_year(year_index);

            // Only the previous total is carried between years
            if year_index > 0 && previous_total_revenue > 0.0 {
                year.revenue_growth_pct =
                    (year.total_revenue - previous_total_revenue) / previous_total_revenue * 100.0;
            }
            previous_total_revenue = year.total_revenue;

            debug!(
                "Year {} total revenue {:.2} (growth {:.2}%)",
                year.calendar_year, year.total_revenue, year.revenue_growth_pct
            );
            years.push(year);
        }

        years
    }

    /// Figures for one year index, with `revenue_growth_pct` left at 0
    pub fn project_year(&self, year_index: u32) -> YearProjection {
        let inputs = &self.inputs;
        let growth_factor = (1.0 + inputs.growth_rate_pct / 100.0).powf(year_index as f64);
        let calendar_year = i32::try_from(year_index)
            .map(|offset| inputs.base_year.saturating_add(offset))
            .unwrap_or(i32::MAX);

        let mut class_details = Vec::with_capacity(BedClass::ALL.len());
        let mut inpatient_revenue = 0.0;
        let mut total_patient_days = 0.0;
        let mut total_patients = 0.0;

        for (class, params) in inputs.bed_classes.iter() {
            let volume = self.class_volume(class, params, growth_factor);
            inpatient_revenue += volume.detail.revenue;
            total_patient_days += volume.patient_days;
            total_patients += volume.patients;
            class_details.push(volume.detail);
        }

        let ancillary = AncillaryRevenue::from_inpatient(inpatient_revenue, &inputs.ancillary);
        let total_revenue = inpatient_revenue + ancillary.total;

        let indicators = Self::indicators(
            inputs.total_beds() as f64,
            total_patient_days,
            total_patients,
            total_revenue,
            growth_factor,
        );

        YearProjection {
            year_index,
            year_label: year_label(calendar_year, year_index),
            calendar_year,
            growth_factor,
            class_details,
            inpatient_revenue,
            ancillary,
            total_revenue,
            revenue_growth_pct: 0.0,
            indicators,
        }
    }

    fn class_volume(&self, class: BedClass, params: &BedClassParams, growth_factor: f64) -> ClassVolume {
        let mix = &self.inputs.payer_mix;

        let patient_days = params.beds as f64 * (params.target_occupancy_pct / 100.0) * DAYS_PER_YEAR;
        let patients = patient_days / params.alos_days;
        let bpjs_patients = patients * (mix.bpjs_share_pct / 100.0);
        let private_patients = patients * (1.0 - mix.bpjs_share_pct / 100.0);

        let bpjs_revenue = bpjs_patients * mix.bpjs_tariff_per_episode;
        let private_revenue = private_patients * params.alos_days * params.private_tariff_per_day;
        let revenue = (bpjs_revenue + private_revenue) * growth_factor;

        ClassVolume {
            detail: ClassDetail {
                class,
                class_name: class.display_name().to_string(),
                beds: params.beds,
                target_occupancy_pct: params.target_occupancy_pct,
                patient_days_occupied: patient_days,
                patient_count: patients,
                display_patient_days: (patient_days * growth_factor).round(),
                display_patient_count: (patients * growth_factor).round(),
                bpjs_patients,
                private_patients,
                bpjs_revenue: bpjs_revenue * growth_factor,
                private_revenue: private_revenue * growth_factor,
                revenue,
            },
            patient_days,
            patients,
        }
    }

    /// BOR, BTO, and patient totals are escalated by the growth factor while ALOS
    /// is computed from unescalated totals, so ALOS stays constant across years.
    fn indicators(
        total_beds: f64,
        total_patient_days: f64,
        total_patients: f64,
        total_revenue: f64,
        growth_factor: f64,
    ) -> Indicators {
        let occupancy_rate = (total_patient_days / (total_beds * DAYS_PER_YEAR)) * 100.0 * growth_factor;
        let bed_turnover = (total_patients * growth_factor) / total_beds;

        Indicators {
            occupancy_rate,
            average_length_of_stay: total_patient_days / total_patients,
            bed_turnover,
            turnover_interval: (DAYS_PER_YEAR - occupancy_rate / 100.0 * DAYS_PER_YEAR) / bed_turnover,
            revenue_per_bed: total_revenue / total_beds,
            total_patients: total_patients * growth_factor,
        }
    }
}

/// Run a projection for `inputs`
pub fn project(inputs: &ProjectionInputs) -> Vec<YearProjection> {
    ProjectionEngine::new(inputs.clone()).project()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn default_inputs() -> ProjectionInputs {
        ProjectionInputs::with_base_year(2025)
    }

    #[test]
    fn test_projection_length_and_years() {
        let years = project(&default_inputs());

        assert_eq!(years.len(), 4);
        for (i, year) in years.iter().enumerate() {
            assert_eq!(year.year_index, i as u32);
            assert_eq!(year.calendar_year, 2025 + i as i32);
        }
        assert_eq!(years[0].year_label, "2025 (Dasar)");
        assert_eq!(years[3].year_label, "2028");
    }

    #[test]
    fn test_vip_base_year_example() {
        let years = project(&default_inputs());
        let vip = years[0].class_detail(BedClass::Vip).unwrap();

        assert_relative_eq!(vip.patient_days_occupied, 2190.0, max_relative = 1e-12);
        assert_relative_eq!(vip.patient_count, 547.5, max_relative = 1e-12);
        assert_relative_eq!(vip.bpjs_patients, 355.875, max_relative = 1e-12);
        assert_relative_eq!(vip.private_patients, 191.625, max_relative = 1e-12);
        assert_relative_eq!(vip.bpjs_revenue, 1_779_375_000.0, max_relative = 1e-12);
        assert_relative_eq!(vip.private_revenue, 1_149_750_000.0, max_relative = 1e-12);
        assert_relative_eq!(vip.revenue, 2_929_125_000.0, max_relative = 1e-12);
        assert_eq!(vip.display_patient_days, 2190.0);
        assert_eq!(vip.display_patient_count, 548.0);
    }

    #[test]
    fn test_base_year_totals_and_indicators() {
        let years = project(&default_inputs());
        let base = &years[0];

        assert_relative_eq!(base.inpatient_revenue, 24_105_512_500.0, max_relative = 1e-12);
        assert_relative_eq!(base.ancillary.total, 16_873_858_750.0, max_relative = 1e-12);
        assert_relative_eq!(base.total_revenue, 40_979_371_250.0, max_relative = 1e-12);

        let ind = &base.indicators;
        assert_relative_eq!(ind.occupancy_rate, 74.5, max_relative = 1e-12);
        assert_relative_eq!(ind.total_patients, 5803.5, max_relative = 1e-12);
        assert_relative_eq!(ind.average_length_of_stay, 27192.5 / 5803.5, max_relative = 1e-12);
        assert_relative_eq!(ind.bed_turnover, 58.035, max_relative = 1e-12);
        assert_relative_eq!(ind.turnover_interval, 93.075 / 58.035, max_relative = 1e-9);
        assert_relative_eq!(ind.revenue_per_bed, 409_793_712.5, max_relative = 1e-12);
    }

    #[test]
    fn test_growth_percent() {
        let years = project(&default_inputs());

        assert_eq!(years[0].revenue_growth_pct, 0.0);
        for year in &years[1..] {
            assert_relative_eq!(year.revenue_growth_pct, 8.0, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_totals_are_exact_sums() {
        for year in project(&default_inputs()) {
            assert_eq!(year.total_revenue, year.inpatient_revenue + year.ancillary.total);

            let a = &year.ancillary;
            assert_eq!(a.total, a.laboratory + a.radiology + a.pharmacy + a.procedure);

            let class_sum: f64 = year.class_details.iter().map(|d| d.revenue).sum();
            assert_relative_eq!(class_sum, year.inpatient_revenue, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_revenue_strictly_increasing_with_positive_growth() {
        let mut inputs = default_inputs();
        inputs.projection_years = 10;
        inputs.growth_rate_pct = 0.5;

        let years = project(&inputs);
        for pair in years.windows(2) {
            assert!(pair[1].total_revenue > pair[0].total_revenue);
        }
    }

    #[test]
    fn test_zero_growth_is_flat() {
        let mut inputs = default_inputs();
        inputs.growth_rate_pct = 0.0;

        let years = project(&inputs);
        for year in &years {
            assert_eq!(year.total_revenue, years[0].total_revenue);
            assert_eq!(year.revenue_growth_pct, 0.0);
        }
    }

    #[test]
    fn test_projection_is_idempotent() {
        let inputs = default_inputs();
        assert_eq!(project(&inputs), project(&inputs));
    }

    #[test]
    fn test_horizon_does_not_affect_early_years() {
        let mut short = default_inputs();
        short.projection_years = 1;
        let long = default_inputs();

        let short_years = project(&short);
        let long_years = project(&long);

        assert_eq!(short_years.len(), 2);
        assert_eq!(short_years[..], long_years[..2]);
    }

    #[test]
    fn test_alos_is_growth_invariant() {
        let years = project(&default_inputs());
        let base_alos = years[0].indicators.average_length_of_stay;

        for year in &years[1..] {
            assert_eq!(year.indicators.average_length_of_stay, base_alos);
            // BOR and BTO scale with the growth factor
            assert_relative_eq!(
                year.indicators.occupancy_rate,
                years[0].indicators.occupancy_rate * year.growth_factor,
                max_relative = 1e-12
            );
            assert_relative_eq!(
                year.indicators.bed_turnover,
                years[0].indicators.bed_turnover * year.growth_factor,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_display_fields_are_escalated_and_rounded() {
        let years = project(&default_inputs());
        let vip_y1 = years[1].class_detail(BedClass::Vip).unwrap();

        // 2190 * 1.08 = 2365.2, 547.5 * 1.08 = 591.3
        assert_eq!(vip_y1.display_patient_days, 2365.0);
        assert_eq!(vip_y1.display_patient_count, 591.0);
        // the unrounded volumes stay at the base level
        assert_relative_eq!(vip_y1.patient_days_occupied, 2190.0, max_relative = 1e-12);
    }

    #[test]
    fn test_all_bpjs_ignores_private_tariff() {
        let mut inputs = default_inputs();
        inputs.payer_mix.bpjs_share_pct = 100.0;
        inputs.bed_classes.vip.private_tariff_per_day = 9_999_999.0;

        let vip = project(&inputs)[0].class_detail(BedClass::Vip).cloned().unwrap();
        assert_eq!(vip.private_revenue, 0.0);
        assert_relative_eq!(vip.revenue, 547.5 * 5_000_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_large_year_index_keeps_growth_direction() {
        let engine = ProjectionEngine::new(ProjectionInputs::with_base_year(i32::MAX));

        // saturates instead of overflowing
        let year = engine.project_year(u32::MAX);
        assert_eq!(year.calendar_year, i32::MAX);
        assert!(year.growth_factor > 1.0);

        let year = engine.project_year(40);
        assert_relative_eq!(year.growth_factor, 1.08_f64.powf(40.0), max_relative = 1e-12);
    }

    #[test]
    fn test_zero_beds_propagates_nan() {
        let mut inputs = default_inputs();
        for class in BedClass::ALL {
            inputs.bed_classes.get_mut(class).beds = 0;
        }

        let years = project(&inputs);
        assert_eq!(years.len(), 4);
        assert!(years[0].indicators.occupancy_rate.is_nan());
        assert!(years[0].indicators.average_length_of_stay.is_nan());
        assert_eq!(years[0].total_revenue, 0.0);
        // no division by a zero previous total
        assert_eq!(years[1].revenue_growth_pct, 0.0);
    }
}
