//! `roi set` command - Edit calculator inputs

use console::style;
use miette::Result;

use crate::cli::helpers::{load_config, load_project, update_session};
use crate::cli::GlobalOpts;
use crate::core::format::format_number;
use crate::core::inputs::{coalesce, parse_numeric, InputField};
use crate::core::session::SessionEvent;

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// `key=value` pairs, or a single `key value`
    ///
    /// Keys are the dotted names shown by `roi fields`, e.g.
    /// factory.output_per_hour or pain3.loss_per_case.
    #[arg(required = true, num_args = 1..)]
    pub assignments: Vec<String>,
}

/// Split the arguments into field/raw-value pairs
fn parse_assignments(args: &[String]) -> Result<Vec<(InputField, String)>> {
    if args.len() == 2 && !args[0].contains('=') && !args[1].contains('=') {
        let field: InputField = args[0].parse().map_err(|e: String| miette::miette!("{}", e))?;
        return Ok(vec![(field, args[1].clone())]);
    }

    args.iter()
        .map(|arg| {
            let (key, value) = arg.split_once('=').ok_or_else(|| {
                miette::miette!("Expected key=value, got '{}'. See `roi fields` for keys", arg)
            })?;
            let field: InputField = key.parse().map_err(|e: String| miette::miette!("{}", e))?;
            Ok((field, value.to_string()))
        })
        .collect()
}

pub fn run(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    let project = load_project()?;
    let config = load_config(&project)?;
    let currency = config.currency();
    let assignments = parse_assignments(&args.assignments)?;

    let events: Vec<SessionEvent> = assignments
        .iter()
        .map(|(field, raw)| {
            if parse_numeric(raw).is_none() {
                log::warn!("'{}' is not a number; {} set to 0", raw, field.key());
            }
            SessionEvent::SetInput(*field, coalesce(raw, 0.0))
        })
        .collect();
    let session = update_session(&project, events)?;

    if !global.quiet {
        for (field, _) in &assignments {
            let value = field.get(&session.inputs);
            let shown = if field.is_currency() {
                currency.format_rate(value, field.suffix().unwrap_or(""))
            } else {
                format!("{} {}", format_number(value), field.suffix().unwrap_or(""))
            };
            println!(
                "{} {} = {}",
                style("✓").green(),
                style(field.key()).cyan(),
                shown.trim_end()
            );
        }
    }
    Ok(())
}
