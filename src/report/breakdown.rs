//! Per-pain calculation breakdown
//!
//! The lines walk the reader from the inputs to the loss figure: one item per
//! input, a spacer, a heading, then the formula with its result.

use serde::Serialize;

use crate::core::format::CurrencyFormat;
use crate::core::inputs::AllInputs;
use crate::core::pain::PainId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Item,
    Spacer,
    Heading,
    Formula,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownLine {
    pub kind: LineKind,
    pub text: String,
}

impl BreakdownLine {
    fn item(text: String) -> Self {
        Self {
            kind: LineKind::Item,
            text,
        }
    }

    fn formula(text: String) -> Self {
        Self {
            kind: LineKind::Formula,
            text,
        }
    }

    fn spacer() -> Self {
        Self {
            kind: LineKind::Spacer,
            text: String::new(),
        }
    }

    fn heading() -> Self {
        Self {
            kind: LineKind::Heading,
            text: "Calculation:".to_string(),
        }
    }
}

impl std::fmt::Display for BreakdownLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            LineKind::Item => write!(f, "• {}", self.text),
            _ => write!(f, "{}", self.text),
        }
    }
}

/// Items, spacer, heading and formula for one pain point
pub fn breakdown_lines(id: PainId, inputs: &AllInputs, currency: &CurrencyFormat) -> Vec<BreakdownLine> {
    let factory = &inputs.factory;
    let cost = factory.total_cost_per_kg();
    let sym = currency.symbol();
    let output = factory.output_per_hour;
    let hours = factory.working_hours_per_day;
    let days = factory.working_days_per_month;

    let (items, formula) = match id {
        PainId::Pain1 => {
            let trials = inputs.pain1.rejected_trials_per_month;
            let run_time = inputs.pain1.run_time_per_batch;
            (
                vec![
                    format!("Rejected trials per month: {} trials", trials),
                    format!("Output per hour: {} kg/hr", output),
                    format!("Run time per batch: {} hours", run_time),
                    format!("Material cost: {}{}/kg", sym, factory.material_cost_per_kg),
                    format!("Processing cost: {}{}/kg", sym, factory.processing_cost_per_kg),
                    format!("Total cost per kg: {}{}/kg", sym, cost),
                ],
                format!(
                    "{} trials × {} kg/hr × {} hrs × {}{}/kg = {}",
                    trials,
                    output,
                    run_time,
                    sym,
                    cost,
                    currency.format(trials * output * run_time * cost)
                ),
            )
        }
        PainId::Pain2 => {
            let savings = inputs.pain2.pigment_savings_per_kg;
            (
                vec![
                    format!("Pigment savings per kg: {}{}/kg", sym, savings),
                    format!("Output per hour: {} kg/hr", output),
                    format!("Working hours per day: {} hrs", hours),
                    format!("Working days per month: {} days", days),
                ],
                format!(
                    "{}{}/kg × {} kg/hr × {} hrs/day × {} days = {}",
                    sym,
                    savings,
                    output,
                    hours,
                    days,
                    currency.format(savings * output * hours * days)
                ),
            )
        }
        PainId::Pain3 => per_case(
            currency,
            "Small batch requests per year",
            "requests",
            inputs.pain3.small_batch_requests_per_year,
            inputs.pain3.loss_per_case,
        ),
        PainId::Pain4 => per_case(
            currency,
            "Experiment requests per year",
            "experiments",
            inputs.pain4.experiment_requests_per_year,
            inputs.pain4.loss_per_case,
        ),
        PainId::Pain5 => {
            let savings = inputs.pain5.recycled_material_savings_per_kg;
            let machines = inputs.pain5.number_of_machines;
            (
                vec![
                    format!("Recycled material savings per kg: {}{}/kg", sym, savings),
                    format!("Number of machines: {}", machines),
                    format!("Output per hour: {} kg/hr", output),
                    format!("Working hours per day: {} hrs", hours),
                    format!("Working days per month: {} days", days),
                ],
                format!(
                    "{}{}/kg × {} kg/hr × {} hrs × {} days × {} machines = {}",
                    sym,
                    savings,
                    output,
                    hours,
                    days,
                    machines,
                    currency.format(savings * output * hours * days * machines)
                ),
            )
        }
        PainId::Pain6 => per_case(
            currency,
            "Peak season requests per year",
            "requests",
            inputs.pain6.peak_season_requests_per_year,
            inputs.pain6.loss_per_case,
        ),
    };

    let period = if id.is_annual_input() { "year" } else { "month" };

    let mut lines: Vec<BreakdownLine> = items.into_iter().map(BreakdownLine::item).collect();
    lines.push(BreakdownLine::spacer());
    lines.push(BreakdownLine::heading());
    lines.push(BreakdownLine::formula(format!("{}/{}", formula, period)));
    lines
}

/// Breakdown shape shared by the count × loss-per-case pains
fn per_case(
    currency: &CurrencyFormat,
    label: &str,
    noun: &str,
    count: f64,
    loss: f64,
) -> (Vec<String>, String) {
    (
        vec![
            format!("{}: {}", label, count),
            format!("Loss per case: {}", currency.format(loss)),
        ],
        format!(
            "{} {} × {} = {}",
            count,
            noun,
            currency.format(loss),
            currency.format(count * loss)
        ),
    )
}
