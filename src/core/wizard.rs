//! Factory settings questionnaire
//!
//! The questionnaire walks the five factory settings in a fixed order. Pain
//! specific inputs start at their defaults and are tuned on the results view.

use crate::core::inputs::{coalesce, AllInputs, InputField};

/// One question of the questionnaire
#[derive(Debug, Clone, Copy)]
pub struct WizardStep {
    pub field: InputField,
    pub title: &'static str,
    pub description: &'static str,
}

/// Questionnaire steps in order
pub const STEPS: [WizardStep; 5] = [
    WizardStep {
        field: InputField::OutputPerHour,
        title: "What is your machine output?",
        description: "Enter your production output per hour in kilograms",
    },
    WizardStep {
        field: InputField::WorkingHoursPerDay,
        title: "How many hours do you operate daily?",
        description: "Enter your typical working hours per day",
    },
    WizardStep {
        field: InputField::WorkingDaysPerMonth,
        title: "How many days do you work per month?",
        description: "Enter your working days in a typical month",
    },
    WizardStep {
        field: InputField::MaterialCostPerKg,
        title: "What is your material cost per kg?",
        description: "Enter the average cost of raw materials",
    },
    WizardStep {
        field: InputField::ProcessingCostPerKg,
        title: "What is your processing cost per kg?",
        description: "Enter your processing/operation cost",
    },
];

/// Number of questionnaire steps
pub fn step_count() -> usize {
    STEPS.len()
}

impl WizardStep {
    /// Value to pre-fill: the current input, or the step default when unset
    pub fn prefill(&self, inputs: &AllInputs) -> f64 {
        let current = self.field.get(inputs);
        if current == 0.0 || !current.is_finite() {
            self.field.default_value()
        } else {
            current
        }
    }

    /// Turn a raw answer into a number; blank, invalid or zero answers take
    /// the step default
    pub fn answer(&self, raw: &str) -> f64 {
        coalesce(raw, self.field.default_value())
    }

    /// Progress label, e.g. `Step 2 of 5`
    pub fn progress(index: usize) -> String {
        format!("Step {} of {}", index + 1, step_count())
    }
}
