//! Interactive session state: the current inputs, the cached projection, and view context
//!
//! A session owns the single mutable copy of the inputs. Any change to them drops
//! the cached projection; [`ProjectionSession::projection`] recomputes on demand.

use log::debug;

use crate::error::InputError;
use crate::inputs::{InputField, ProjectionInputs};
use crate::projection::{ProjectionEngine, ProjectionSummary, YearProjection};

/// Top-level view of the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTab {
    #[default]
    Dashboard,
    Details,
    Analysis,
}

impl ActiveTab {
    pub fn label(self) -> &'static str {
        match self {
            ActiveTab::Dashboard => "Dashboard",
            ActiveTab::Details => "Tabel Detail",
            ActiveTab::Analysis => "Analisa",
        }
    }
}

/// Collapsible group of configuration fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    /// Time horizon, growth, and ancillary mix
    Mix,
    Beds,
    Bor,
    Finance,
}

impl ConfigSection {
    pub const ALL: [ConfigSection; 4] = [
        ConfigSection::Mix,
        ConfigSection::Beds,
        ConfigSection::Bor,
        ConfigSection::Finance,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ConfigSection::Mix => "Waktu & Pertumbuhan",
            ConfigSection::Beds => "Kapasitas TT",
            ConfigSection::Bor => "Target BOR",
            ConfigSection::Finance => "Tarif & BPJS",
        }
    }

    /// Fields edited in this section
    pub fn fields(self) -> Vec<InputField> {
        use crate::inputs::BedClass;
        match self {
            ConfigSection::Mix => vec![
                InputField::BaseYear,
                InputField::ProjectionYears,
                InputField::GrowthRate,
                InputField::LabRate,
                InputField::RadiologyRate,
                InputField::PharmacyRate,
                InputField::ProcedureRate,
            ],
            ConfigSection::Beds => BedClass::ALL.into_iter().map(InputField::Beds).collect(),
            ConfigSection::Bor => BedClass::ALL
                .into_iter()
                .flat_map(|c| [InputField::Occupancy(c), InputField::LengthOfStay(c)])
                .collect(),
            ConfigSection::Finance => {
                let mut fields: Vec<_> = BedClass::ALL.into_iter().map(InputField::PrivateTariff).collect();
                fields.push(InputField::BpjsShare);
                fields.push(InputField::BpjsTariff);
                fields
            }
        }
    }
}

/// Single-owner session around one parameter set
#[derive(Debug, Clone)]
pub struct ProjectionSession {
    inputs: ProjectionInputs,
    cached: Option<Vec<YearProjection>>,
    pub active_tab: ActiveTab,
    expanded_section: Option<ConfigSection>,
}

impl ProjectionSession {
    pub fn new(inputs: ProjectionInputs) -> Self {
        Self {
            inputs,
            cached: None,
            active_tab: ActiveTab::default(),
            expanded_section: Some(ConfigSection::Mix),
        }
    }

    pub fn inputs(&self) -> &ProjectionInputs {
        &self.inputs
    }

    /// Replace the whole parameter set
    pub fn set_inputs(&mut self, inputs: ProjectionInputs) {
        if inputs != self.inputs {
            self.inputs = inputs;
            self.invalidate();
        }
    }

    /// Assign one field from raw widget text
    pub fn set_field(&mut self, field: InputField, raw: &str) {
        let mut next = self.inputs.clone();
        field.set_raw(&mut next, raw);
        self.set_inputs(next);
    }

    pub fn adjust_base_year(&mut self, delta: i32) {
        let mut next = self.inputs.clone();
        next.base_year = next.base_year.saturating_add(delta);
        self.set_inputs(next);
    }

    /// Projection for the current inputs, computed at most once per input set
    pub fn projection(&mut self) -> Result<&[YearProjection], InputError> {
        self.inputs.validate()?;
        if self.cached.is_none() {
            debug!("Recomputing projection for {} years", self.inputs.projection_years + 1);
            self.cached = Some(ProjectionEngine::new(self.inputs.clone()).project());
        }
        Ok(self.cached.as_deref().unwrap_or_default())
    }

    pub fn summary(&mut self) -> Result<ProjectionSummary, InputError> {
        self.projection().map(ProjectionSummary::from_years)
    }

    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }

    pub fn expanded_section(&self) -> Option<ConfigSection> {
        self.expanded_section
    }

    /// Open `section`, or close it if it is already open
    pub fn toggle_section(&mut self, section: ConfigSection) {
        self.expanded_section = if self.expanded_section == Some(section) {
            None
        } else {
            Some(section)
        };
    }

    fn invalidate(&mut self) {
        self.cached = None;
    }
}

impl Default for ProjectionSession {
    fn default() -> Self {
        Self::new(ProjectionInputs::default())
    }
}
