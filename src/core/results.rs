//! Pain results and selection
//!
//! Selection is session state layered over the computed numbers. Changing it
//! never touches a loss value, only whether it counts towards the total.

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::calc::LossEstimate;
use crate::core::pain::PainId;

/// One computed pain point, as shown on the results page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PainResult {
    pub id: PainId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "loss_or_nan")]
    pub annual_loss: f64,
    #[serde(deserialize_with = "loss_or_nan")]
    pub monthly_loss: f64,
    #[serde(default = "default_selected")]
    pub is_selected: bool,
}

fn default_selected() -> bool {
    true
}

/// serde_json writes non-finite floats as `null`; read them back as NaN
fn loss_or_nan<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl PainResult {
    /// A selected result carrying the catalog text for `id`
    pub fn new(id: PainId, estimate: LossEstimate) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            description: id.description().to_string(),
            annual_loss: estimate.annual,
            monthly_loss: estimate.monthly,
            is_selected: true,
        }
    }
}

/// Carry selection from a previous result set onto freshly computed results
///
/// Each fresh record takes `is_selected` from the previous record with the
/// same id. Records with no predecessor keep their own flag.
pub fn merge_selection(previous: &[PainResult], fresh: Vec<PainResult>) -> Vec<PainResult> {
    fresh
        .into_iter()
        .map(|mut result| {
            if let Some(prior) = previous.iter().find(|p| p.id == result.id) {
                result.is_selected = prior.is_selected;
            }
            result
        })
        .collect()
}

/// Flip selection of one pain point. Returns the new state, or `None` if
/// the id is not present.
pub fn toggle(results: &mut [PainResult], id: PainId) -> Option<bool> {
    results.iter_mut().find(|r| r.id == id).map(|r| {
        r.is_selected = !r.is_selected;
        r.is_selected
    })
}

/// Set selection of one pain point. Returns `false` if the id is not present.
pub fn set_selected(results: &mut [PainResult], id: PainId, selected: bool) -> bool {
    match results.iter_mut().find(|r| r.id == id) {
        Some(r) => {
            r.is_selected = selected;
            true
        }
        None => false,
    }
}

pub fn set_all_selected(results: &mut [PainResult], selected: bool) {
    for r in results.iter_mut() {
        r.is_selected = selected;
    }
}

pub fn selected_count(results: &[PainResult]) -> usize {
    results.iter().filter(|r| r.is_selected).count()
}

/// Look up a result by id
pub fn find(results: &[PainResult], id: PainId) -> Option<&PainResult> {
    results.iter().find(|r| r.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calc::{calculate_all_pains, calculate_total};
    use crate::core::inputs::AllInputs;

    #[test]
    fn test_merge_with_empty_previous_keeps_defaults() {
        let fresh = calculate_all_pains(&AllInputs::default());
        let merged = merge_selection(&[], fresh.clone());
        assert_eq!(merged, fresh);
    }

    #[test]
    fn test_merge_preserves_deselected_pain() {
        let mut previous = calculate_all_pains(&AllInputs::default());
        set_selected(&mut previous, PainId::Pain4, false);

        let mut inputs = AllInputs::default();
        inputs.factory.output_per_hour = 500.0;
        let merged = merge_selection(&previous, calculate_all_pains(&inputs));

        assert!(!find(&merged, PainId::Pain4).unwrap().is_selected);
        assert_eq!(selected_count(&merged), 5);
        // numbers come from the fresh computation
        assert_eq!(find(&merged, PainId::Pain1).unwrap().monthly_loss, 165000.0);
    }

    #[test]
    fn test_merge_with_partial_previous() {
        let mut previous = calculate_all_pains(&AllInputs::default());
        previous.retain(|r| r.id == PainId::Pain2);
        previous[0].is_selected = false;

        let merged = merge_selection(&previous, calculate_all_pains(&AllInputs::default()));
        assert!(!merged[1].is_selected);
        assert!(merged.iter().filter(|r| r.id != PainId::Pain2).all(|r| r.is_selected));
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut results = calculate_all_pains(&AllInputs::default());
        assert_eq!(toggle(&mut results, PainId::Pain3), Some(false));
        assert_eq!(toggle(&mut results, PainId::Pain3), Some(true));
    }

    #[test]
    fn test_toggle_missing_id() {
        let mut results = calculate_all_pains(&AllInputs::default());
        results.retain(|r| r.id != PainId::Pain6);
        assert_eq!(toggle(&mut results, PainId::Pain6), None);
        assert!(!set_selected(&mut results, PainId::Pain6, false));
    }

    #[test]
    fn test_toggle_does_not_touch_losses() {
        let mut results = calculate_all_pains(&AllInputs::default());
        let before = results.clone();
        toggle(&mut results, PainId::Pain1);
        assert_eq!(results[0].annual_loss, before[0].annual_loss);
        assert_eq!(results[0].monthly_loss, before[0].monthly_loss);
    }

    #[test]
    fn test_each_toggle_moves_total_by_its_annual_loss() {
        let base = calculate_all_pains(&AllInputs::default());
        let full = calculate_total(&base);
        for id in PainId::ALL {
            let mut results = base.clone();
            toggle(&mut results, id);
            let loss = find(&results, id).unwrap().annual_loss;
            assert_eq!(full - calculate_total(&results), loss, "pain {}", id);
        }
    }

    #[test]
    fn test_set_all_selected() {
        let mut results = calculate_all_pains(&AllInputs::default());
        set_all_selected(&mut results, false);
        assert_eq!(selected_count(&results), 0);
        set_all_selected(&mut results, true);
        assert_eq!(selected_count(&results), 6);
    }

    #[test]
    fn test_json_shape() {
        let results = calculate_all_pains(&AllInputs::default());
        let json = serde_json::to_value(&results[0]).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["annualLoss"], 792000.0);
        assert_eq!(json["monthlyLoss"], 66000.0);
        assert_eq!(json["isSelected"], true);
    }
}
