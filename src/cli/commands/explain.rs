//! `roi explain` command - How a pain point arises and how its loss is computed

use console::style;
use miette::Result;
use serde::Serialize;

use crate::cli::helpers::{load_config, load_project};
use crate::cli::output::{effective_format, print_structured};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::pain::PainId;
use crate::core::session::SessionStore;
use crate::report::breakdown::{breakdown_lines, BreakdownLine, LineKind};

#[derive(clap::Args, Debug)]
pub struct ExplainArgs {
    /// Pain point id (1-6 or pain1..pain6)
    pub id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExplainView {
    id: PainId,
    title: &'static str,
    description: &'static str,
    scenario: &'static str,
    problem: &'static str,
    solution: &'static str,
    example: &'static str,
    annual_loss: f64,
    monthly_loss: f64,
    breakdown: Vec<BreakdownLine>,
}

pub fn run(args: ExplainArgs, global: &GlobalOpts) -> Result<()> {
    let project = load_project()?;
    let config = load_config(&project)?;
    let currency = config.currency();
    let session = SessionStore::load_or_default(&project);

    let id: PainId = args.id.parse().map_err(|e: String| miette::miette!("{}", e))?;
    let explanation = id.explanation();
    let (annual_loss, monthly_loss) = session
        .result(id)
        .map(|r| (r.annual_loss, r.monthly_loss))
        .unwrap_or_default();
    let breakdown = breakdown_lines(id, &session.inputs, &currency);

    let format = effective_format(global.output);
    if matches!(format, OutputFormat::Json | OutputFormat::Yaml) {
        let view = ExplainView {
            id,
            title: id.title(),
            description: id.description(),
            scenario: explanation.scenario,
            problem: explanation.problem,
            solution: explanation.solution,
            example: explanation.example,
            annual_loss,
            monthly_loss,
            breakdown,
        };
        print_structured(&view, format)?;
        return Ok(());
    }

    println!("{} {}", style(format!("{}.", id.number())).dim(), style(id.title()).bold());
    println!("{}", style(id.description()).dim());
    println!();
    for (heading, text) in [
        ("The scenario", explanation.scenario),
        ("The problem", explanation.problem),
        ("The solution", explanation.solution),
        ("Example", explanation.example),
    ] {
        println!("{}", style(heading).cyan().bold());
        println!("  {}", text);
        println!();
    }

    println!("{}", style("With your numbers").cyan().bold());
    for line in &breakdown {
        match line.kind {
            LineKind::Heading => println!("  {}", style(line).bold()),
            LineKind::Formula => println!("  {}", style(line).green()),
            _ => println!("  {}", line),
        }
    }
    println!();
    println!(
        "  Monthly: {}   Annual: {}",
        currency.format(monthly_loss),
        style(currency.format(annual_loss)).bold()
    );
    Ok(())
}
