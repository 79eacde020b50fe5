//! ROI calculation engine
//!
//! Pure functions from calculator inputs to loss estimates. Pains 1, 2 and 5
//! are driven by monthly operating figures and annualize by ×12; pains 3, 4
//! and 6 are driven by yearly incident counts and derive the monthly figure
//! by ÷12. Nothing here validates or rounds: negative and NaN inputs flow
//! straight through the arithmetic.

use serde::{Deserialize, Serialize};

use crate::core::inputs::{
    AllInputs, FactorySettings, Pain1Inputs, Pain2Inputs, Pain3Inputs, Pain4Inputs, Pain5Inputs,
    Pain6Inputs,
};
use crate::core::pain::PainId;
use crate::core::results::PainResult;

/// Monthly and annual magnitude of one pain point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossEstimate {
    pub monthly: f64,
    pub annual: f64,
}

impl LossEstimate {
    /// Build from a per-month figure
    pub fn from_monthly(monthly: f64) -> Self {
        Self {
            monthly,
            annual: monthly * 12.0,
        }
    }

    /// Build from a per-year figure
    pub fn from_annual(annual: f64) -> Self {
        Self {
            monthly: annual / 12.0,
            annual,
        }
    }
}

/// Pain 1: rejected trials × output × run time × (material + processing cost)
pub fn calculate_pain1(factory: &FactorySettings, pain1: &Pain1Inputs) -> LossEstimate {
    let total_cost_per_kg = factory.total_cost_per_kg();
    LossEstimate::from_monthly(
        pain1.rejected_trials_per_month
            * factory.output_per_hour
            * pain1.run_time_per_batch
            * total_cost_per_kg,
    )
}

/// Pain 2: pigment savings × output × hours × days
pub fn calculate_pain2(factory: &FactorySettings, pain2: &Pain2Inputs) -> LossEstimate {
    LossEstimate::from_monthly(
        pain2.pigment_savings_per_kg
            * factory.output_per_hour
            * factory.working_hours_per_day
            * factory.working_days_per_month,
    )
}

/// Pain 3: small batch requests per year × loss per case
pub fn calculate_pain3(pain3: &Pain3Inputs) -> LossEstimate {
    LossEstimate::from_annual(pain3.small_batch_requests_per_year * pain3.loss_per_case)
}

/// Pain 4: experiment requests per year × loss per case
pub fn calculate_pain4(pain4: &Pain4Inputs) -> LossEstimate {
    LossEstimate::from_annual(pain4.experiment_requests_per_year * pain4.loss_per_case)
}

/// Pain 5: recycled material savings × output × hours × days × machines
pub fn calculate_pain5(factory: &FactorySettings, pain5: &Pain5Inputs) -> LossEstimate {
    LossEstimate::from_monthly(
        pain5.recycled_material_savings_per_kg
            * factory.output_per_hour
            * factory.working_hours_per_day
            * factory.working_days_per_month
            * pain5.number_of_machines,
    )
}

/// Pain 6: peak season requests per year × loss per case
pub fn calculate_pain6(pain6: &Pain6Inputs) -> LossEstimate {
    LossEstimate::from_annual(pain6.peak_season_requests_per_year * pain6.loss_per_case)
}

/// Dispatch to the formula for one pain point
pub fn calculate_pain(id: PainId, inputs: &AllInputs) -> LossEstimate {
    match id {
        PainId::Pain1 => calculate_pain1(&inputs.factory, &inputs.pain1),
        PainId::Pain2 => calculate_pain2(&inputs.factory, &inputs.pain2),
        PainId::Pain3 => calculate_pain3(&inputs.pain3),
        PainId::Pain4 => calculate_pain4(&inputs.pain4),
        PainId::Pain5 => calculate_pain5(&inputs.factory, &inputs.pain5),
        PainId::Pain6 => calculate_pain6(&inputs.pain6),
    }
}

/// Compute all six pain points, ids 1 through 6, each selected
pub fn calculate_all_pains(inputs: &AllInputs) -> Vec<PainResult> {
    PainId::ALL
        .into_iter()
        .map(|id| PainResult::new(id, calculate_pain(id, inputs)))
        .collect()
}

/// Sum of annual losses over the selected results
pub fn calculate_total(results: &[PainResult]) -> f64 {
    results
        .iter()
        .filter(|r| r.is_selected)
        .map(|r| r.annual_loss)
        .sum()
}
