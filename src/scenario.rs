//! Scenario runner for comparing projections
//!
//! Holds one validated base parameter set and runs variations of it (growth
//! rates, horizons, arbitrary edits) without touching the base.

use log::debug;

use crate::error::InputError;
use crate::inputs::ProjectionInputs;
use crate::projection::{ProjectionEngine, ProjectionSummary, YearProjection};

/// Result of one scenario
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub name: String,
    pub inputs: ProjectionInputs,
    pub years: Vec<YearProjection>,
}

impl ScenarioResult {
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary::from_years(&self.years)
    }
}

/// Runs variations of a base parameter set
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(ProjectionInputs::default())?;
/// for result in runner.run_growth_rates(&[4.0, 8.0, 12.0])? {
///     println!("{}: {}", result.name, result.summary().final_total_revenue);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_inputs: ProjectionInputs,
}

impl ScenarioRunner {
    /// Create a runner; the base inputs must validate
    pub fn new(base_inputs: ProjectionInputs) -> Result<Self, InputError> {
        base_inputs.validate()?;
        Ok(Self { base_inputs })
    }

    pub fn base_inputs(&self) -> &ProjectionInputs {
        &self.base_inputs
    }

    /// Project the base inputs unchanged
    pub fn run_base(&self) -> ScenarioResult {
        ScenarioResult {
            name: "Dasar".to_string(),
            inputs: self.base_inputs.clone(),
            years: ProjectionEngine::new(self.base_inputs.clone()).project(),
        }
    }

    /// Project a copy of the base inputs after `edit` has been applied to it
    pub fn run_with<F>(&self, name: impl Into<String>, edit: F) -> Result<ScenarioResult, InputError>
    where
        F: FnOnce(&mut ProjectionInputs),
    {
        let mut inputs = self.base_inputs.clone();
        edit(&mut inputs);
        inputs.validate()?;

        let name = name.into();
        debug!("Running scenario {}", name);
        let years = ProjectionEngine::new(inputs.clone()).project();
        Ok(ScenarioResult { name, inputs, years })
    }

    /// One scenario per annual growth rate (percent)
    pub fn run_growth_rates(&self, rates: &[f64]) -> Result<Vec<ScenarioResult>, InputError> {
        rates
            .iter()
            .map(|&rate| self.run_with(format!("Growth {}%", rate), |inputs| inputs.growth_rate_pct = rate))
            .collect()
    }

    /// One scenario per BPJS share (percent)
    pub fn run_bpjs_shares(&self, shares: &[f64]) -> Result<Vec<ScenarioResult>, InputError> {
        shares
            .iter()
            .map(|&share| self.run_with(format!("BPJS {}%", share), |inputs| inputs.payer_mix.bpjs_share_pct = share))
            .collect()
    }

    /// Same inputs over a different projection horizon
    pub fn run_horizon(&self, projection_years: u32) -> Result<ScenarioResult, InputError> {
        self.run_with(format!("{} tahun", projection_years), |inputs| {
            inputs.projection_years = projection_years
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> ScenarioRunner {
        ScenarioRunner::new(ProjectionInputs::with_base_year(2025)).unwrap()
    }

    #[test]
    fn test_growth_rate_sweep() {
        let results = runner().run_growth_rates(&[2.0, 8.0, 15.0]).unwrap();
        assert_eq!(results.len(), 3);

        // Higher growth should end with higher revenue
        assert!(results[2].summary().final_total_revenue > results[0].summary().final_total_revenue);
        // Base year is unaffected by the growth rate
        assert_eq!(results[0].years[0].total_revenue, results[2].years[0].total_revenue);
    }

    #[test]
    fn test_base_inputs_are_not_modified() {
        let runner = runner();
        let before = runner.base_inputs().clone();
        runner.run_growth_rates(&[20.0]).unwrap();
        assert_eq!(runner.base_inputs(), &before);
    }

    #[test]
    fn test_horizon_scenario_matches_base_prefix() {
        let runner = runner();
        let base = runner.run_base();
        let longer = runner.run_horizon(6).unwrap();

        assert_eq!(longer.years.len(), 7);
        assert_eq!(longer.years[..base.years.len()], base.years[..]);
    }

    #[test]
    fn test_invalid_scenario_is_rejected() {
        let err = runner().run_bpjs_shares(&[50.0, 150.0]).unwrap_err();
        assert_eq!(err, InputError::BpjsShareOutOfRange(150.0));
    }

    #[test]
    fn test_invalid_base_is_rejected() {
        let mut inputs = ProjectionInputs::with_base_year(2025);
        inputs.projection_years = 0;
        assert!(ScenarioRunner::new(inputs).is_err());
    }
}
