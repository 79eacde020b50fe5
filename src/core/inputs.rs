//! Calculator inputs - factory settings and per-pain parameters
//!
//! Every numeric field the user can edit is also reachable through the closed
//! [`InputField`] enum, so callers never address inputs by string property.

use serde::{Deserialize, Serialize};

use crate::core::pain::PainId;

/// Throughput and cost parameters shared by several pain calculations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FactorySettings {
    /// Machine output in kg/hr
    pub output_per_hour: f64,
    /// Hours of operation per day
    pub working_hours_per_day: f64,
    /// Working days in a typical month
    pub working_days_per_month: f64,
    /// Raw material cost per kg
    pub material_cost_per_kg: f64,
    /// Processing/operation cost per kg
    pub processing_cost_per_kg: f64,
}

impl Default for FactorySettings {
    fn default() -> Self {
        Self {
            output_per_hour: 200.0,
            working_hours_per_day: 22.0,
            working_days_per_month: 25.0,
            material_cost_per_kg: 100.0,
            processing_cost_per_kg: 10.0,
        }
    }
}

impl FactorySettings {
    /// Material plus processing cost for one kg
    pub fn total_cost_per_kg(&self) -> f64 {
        self.material_cost_per_kg + self.processing_cost_per_kg
    }
}

/// Color rejection after stretching
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pain1Inputs {
    pub rejected_trials_per_month: f64,
    /// Hours of production per rejected batch
    pub run_time_per_batch: f64,
}

impl Default for Pain1Inputs {
    fn default() -> Self {
        Self {
            rejected_trials_per_month: 1.0,
            run_time_per_batch: 3.0,
        }
    }
}

/// Missed pigment R&D
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pain2Inputs {
    pub pigment_savings_per_kg: f64,
}

impl Default for Pain2Inputs {
    fn default() -> Self {
        Self {
            pigment_savings_per_kg: 1.0,
        }
    }
}

/// Small batch customer trials
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pain3Inputs {
    pub small_batch_requests_per_year: f64,
    pub loss_per_case: f64,
}

impl Default for Pain3Inputs {
    fn default() -> Self {
        Self {
            small_batch_requests_per_year: 3.0,
            loss_per_case: 25000.0,
        }
    }
}

/// Experiments blocked by production
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pain4Inputs {
    pub experiment_requests_per_year: f64,
    pub loss_per_case: f64,
}

impl Default for Pain4Inputs {
    fn default() -> Self {
        Self {
            experiment_requests_per_year: 3.0,
            loss_per_case: 25000.0,
        }
    }
}

/// Recycled material testing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pain5Inputs {
    pub recycled_material_savings_per_kg: f64,
    pub number_of_machines: f64,
}

impl Default for Pain5Inputs {
    fn default() -> Self {
        Self {
            recycled_material_savings_per_kg: 1.0,
            number_of_machines: 1.0,
        }
    }
}

/// Peak season customer trials
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pain6Inputs {
    pub peak_season_requests_per_year: f64,
    pub loss_per_case: f64,
}

impl Default for Pain6Inputs {
    fn default() -> Self {
        Self {
            peak_season_requests_per_year: 2.0,
            loss_per_case: 25000.0,
        }
    }
}

/// Everything the calculator needs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllInputs {
    pub factory: FactorySettings,
    pub pain1: Pain1Inputs,
    pub pain2: Pain2Inputs,
    pub pain3: Pain3Inputs,
    pub pain4: Pain4Inputs,
    pub pain5: Pain5Inputs,
    pub pain6: Pain6Inputs,
}

// =========================================================================
// Field addressing
// =========================================================================

/// One editable numeric input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    OutputPerHour,
    WorkingHoursPerDay,
    WorkingDaysPerMonth,
    MaterialCostPerKg,
    ProcessingCostPerKg,
    RejectedTrialsPerMonth,
    RunTimePerBatch,
    PigmentSavingsPerKg,
    SmallBatchRequestsPerYear,
    SmallBatchLossPerCase,
    ExperimentRequestsPerYear,
    ExperimentLossPerCase,
    RecycledMaterialSavingsPerKg,
    NumberOfMachines,
    PeakSeasonRequestsPerYear,
    PeakSeasonLossPerCase,
}

impl InputField {
    /// All fields, factory settings first, then pains 1 through 6
    pub const ALL: [InputField; 16] = [
        InputField::OutputPerHour,
        InputField::WorkingHoursPerDay,
        InputField::WorkingDaysPerMonth,
        InputField::MaterialCostPerKg,
        InputField::ProcessingCostPerKg,
        InputField::RejectedTrialsPerMonth,
        InputField::RunTimePerBatch,
        InputField::PigmentSavingsPerKg,
        InputField::SmallBatchRequestsPerYear,
        InputField::SmallBatchLossPerCase,
        InputField::ExperimentRequestsPerYear,
        InputField::ExperimentLossPerCase,
        InputField::RecycledMaterialSavingsPerKg,
        InputField::NumberOfMachines,
        InputField::PeakSeasonRequestsPerYear,
        InputField::PeakSeasonLossPerCase,
    ];

    /// Dotted key used on the command line (e.g. `pain3.loss_per_case`)
    pub fn key(&self) -> &'static str {
        match self {
            InputField::OutputPerHour => "factory.output_per_hour",
            InputField::WorkingHoursPerDay => "factory.working_hours_per_day",
            InputField::WorkingDaysPerMonth => "factory.working_days_per_month",
            InputField::MaterialCostPerKg => "factory.material_cost_per_kg",
            InputField::ProcessingCostPerKg => "factory.processing_cost_per_kg",
            InputField::RejectedTrialsPerMonth => "pain1.rejected_trials_per_month",
            InputField::RunTimePerBatch => "pain1.run_time_per_batch",
            InputField::PigmentSavingsPerKg => "pain2.pigment_savings_per_kg",
            InputField::SmallBatchRequestsPerYear => "pain3.small_batch_requests_per_year",
            InputField::SmallBatchLossPerCase => "pain3.loss_per_case",
            InputField::ExperimentRequestsPerYear => "pain4.experiment_requests_per_year",
            InputField::ExperimentLossPerCase => "pain4.loss_per_case",
            InputField::RecycledMaterialSavingsPerKg => "pain5.recycled_material_savings_per_kg",
            InputField::NumberOfMachines => "pain5.number_of_machines",
            InputField::PeakSeasonRequestsPerYear => "pain6.peak_season_requests_per_year",
            InputField::PeakSeasonLossPerCase => "pain6.loss_per_case",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            InputField::OutputPerHour => "Output per hour",
            InputField::WorkingHoursPerDay => "Working hours per day",
            InputField::WorkingDaysPerMonth => "Working days per month",
            InputField::MaterialCostPerKg => "Material cost per kg",
            InputField::ProcessingCostPerKg => "Processing cost per kg",
            InputField::RejectedTrialsPerMonth => "Rejected trials/month",
            InputField::RunTimePerBatch => "Run time per batch",
            InputField::PigmentSavingsPerKg => "Pigment savings",
            InputField::SmallBatchRequestsPerYear => "Small batch requests/year",
            InputField::SmallBatchLossPerCase => "Loss per case",
            InputField::ExperimentRequestsPerYear => "Experiment requests/year",
            InputField::ExperimentLossPerCase => "Loss per case",
            InputField::RecycledMaterialSavingsPerKg => "Material savings",
            InputField::NumberOfMachines => "Number of machines",
            InputField::PeakSeasonRequestsPerYear => "Peak season requests/year",
            InputField::PeakSeasonLossPerCase => "Loss per case",
        }
    }

    /// Unit shown after the value
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            InputField::OutputPerHour => Some("kg/hr"),
            InputField::WorkingHoursPerDay => Some("hrs/day"),
            InputField::WorkingDaysPerMonth => Some("days/month"),
            InputField::MaterialCostPerKg
            | InputField::ProcessingCostPerKg
            | InputField::PigmentSavingsPerKg
            | InputField::RecycledMaterialSavingsPerKg => Some("/kg"),
            InputField::RejectedTrialsPerMonth => Some("trials"),
            InputField::RunTimePerBatch => Some("hrs"),
            InputField::SmallBatchRequestsPerYear
            | InputField::ExperimentRequestsPerYear
            | InputField::PeakSeasonRequestsPerYear => Some("cases"),
            InputField::NumberOfMachines => Some("machines"),
            InputField::SmallBatchLossPerCase
            | InputField::ExperimentLossPerCase
            | InputField::PeakSeasonLossPerCase => None,
        }
    }

    /// Whether the value is an amount of money (shown with the currency symbol)
    pub fn is_currency(&self) -> bool {
        matches!(
            self,
            InputField::MaterialCostPerKg
                | InputField::ProcessingCostPerKg
                | InputField::PigmentSavingsPerKg
                | InputField::SmallBatchLossPerCase
                | InputField::ExperimentLossPerCase
                | InputField::RecycledMaterialSavingsPerKg
                | InputField::PeakSeasonLossPerCase
        )
    }

    /// The pain this field belongs to, or `None` for factory settings
    pub fn pain(&self) -> Option<PainId> {
        match self {
            InputField::OutputPerHour
            | InputField::WorkingHoursPerDay
            | InputField::WorkingDaysPerMonth
            | InputField::MaterialCostPerKg
            | InputField::ProcessingCostPerKg => None,
            InputField::RejectedTrialsPerMonth | InputField::RunTimePerBatch => Some(PainId::Pain1),
            InputField::PigmentSavingsPerKg => Some(PainId::Pain2),
            InputField::SmallBatchRequestsPerYear | InputField::SmallBatchLossPerCase => {
                Some(PainId::Pain3)
            }
            InputField::ExperimentRequestsPerYear | InputField::ExperimentLossPerCase => {
                Some(PainId::Pain4)
            }
            InputField::RecycledMaterialSavingsPerKg | InputField::NumberOfMachines => {
                Some(PainId::Pain5)
            }
            InputField::PeakSeasonRequestsPerYear | InputField::PeakSeasonLossPerCase => {
                Some(PainId::Pain6)
            }
        }
    }

    /// Fields that feed a given pain's own input group
    pub fn for_pain(pain: PainId) -> impl Iterator<Item = InputField> {
        Self::ALL.into_iter().filter(move |f| f.pain() == Some(pain))
    }

    /// The factory setting fields, in questionnaire order
    pub fn factory() -> impl Iterator<Item = InputField> {
        Self::ALL.into_iter().filter(|f| f.pain().is_none())
    }

    pub fn default_value(&self) -> f64 {
        self.get(&AllInputs::default())
    }

    /// Read this field from a set of inputs
    pub fn get(&self, inputs: &AllInputs) -> f64 {
        match self {
            InputField::OutputPerHour => inputs.factory.output_per_hour,
            InputField::WorkingHoursPerDay => inputs.factory.working_hours_per_day,
            InputField::WorkingDaysPerMonth => inputs.factory.working_days_per_month,
            InputField::MaterialCostPerKg => inputs.factory.material_cost_per_kg,
            InputField::ProcessingCostPerKg => inputs.factory.processing_cost_per_kg,
            InputField::RejectedTrialsPerMonth => inputs.pain1.rejected_trials_per_month,
            InputField::RunTimePerBatch => inputs.pain1.run_time_per_batch,
            InputField::PigmentSavingsPerKg => inputs.pain2.pigment_savings_per_kg,
            InputField::SmallBatchRequestsPerYear => inputs.pain3.small_batch_requests_per_year,
            InputField::SmallBatchLossPerCase => inputs.pain3.loss_per_case,
            InputField::ExperimentRequestsPerYear => inputs.pain4.experiment_requests_per_year,
            InputField::ExperimentLossPerCase => inputs.pain4.loss_per_case,
            InputField::RecycledMaterialSavingsPerKg => {
                inputs.pain5.recycled_material_savings_per_kg
            }
            InputField::NumberOfMachines => inputs.pain5.number_of_machines,
            InputField::PeakSeasonRequestsPerYear => inputs.pain6.peak_season_requests_per_year,
            InputField::PeakSeasonLossPerCase => inputs.pain6.loss_per_case,
        }
    }

    /// Write this field into a set of inputs
    pub fn set(&self, inputs: &mut AllInputs, value: f64) {
        let slot = match self {
            InputField::OutputPerHour => &mut inputs.factory.output_per_hour,
            InputField::WorkingHoursPerDay => &mut inputs.factory.working_hours_per_day,
            InputField::WorkingDaysPerMonth => &mut inputs.factory.working_days_per_month,
            InputField::MaterialCostPerKg => &mut inputs.factory.material_cost_per_kg,
            InputField::ProcessingCostPerKg => &mut inputs.factory.processing_cost_per_kg,
            InputField::RejectedTrialsPerMonth => &mut inputs.pain1.rejected_trials_per_month,
            InputField::RunTimePerBatch => &mut inputs.pain1.run_time_per_batch,
            InputField::PigmentSavingsPerKg => &mut inputs.pain2.pigment_savings_per_kg,
            InputField::SmallBatchRequestsPerYear => {
                &mut inputs.pain3.small_batch_requests_per_year
            }
            InputField::SmallBatchLossPerCase => &mut inputs.pain3.loss_per_case,
            InputField::ExperimentRequestsPerYear => &mut inputs.pain4.experiment_requests_per_year,
            InputField::ExperimentLossPerCase => &mut inputs.pain4.loss_per_case,
            InputField::RecycledMaterialSavingsPerKg => {
                &mut inputs.pain5.recycled_material_savings_per_kg
            }
            InputField::NumberOfMachines => &mut inputs.pain5.number_of_machines,
            InputField::PeakSeasonRequestsPerYear => {
                &mut inputs.pain6.peak_season_requests_per_year
            }
            InputField::PeakSeasonLossPerCase => &mut inputs.pain6.loss_per_case,
        };
        *slot = value;
    }
}

impl std::fmt::Display for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for InputField {
    type Err = String;

    /// Accepts the dotted key in snake_case or camelCase
    /// (`pain3.loss_per_case`, `pain3.lossPerCase`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_key(s);
        Self::ALL
            .into_iter()
            .find(|f| normalize_key(f.key()) == wanted)
            .ok_or_else(|| {
                format!(
                    "Unknown input field: {}. Run `roi fields` to list valid fields",
                    s
                )
            })
    }
}

fn normalize_key(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

// =========================================================================
// Coalescing raw text into numbers
// =========================================================================

/// Parse user text as a finite number
pub fn parse_numeric(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parse user text, falling back when it is blank, non-numeric or zero
///
/// Zero falls back as well: the questionnaire treats an entered `0` like an
/// empty answer. Pass `0.0` as the fallback for the results-page editors.
pub fn coalesce(raw: &str, fallback: f64) -> f64 {
    match parse_numeric(raw) {
        Some(v) if v != 0.0 => v,
        _ => fallback,
    }
}
