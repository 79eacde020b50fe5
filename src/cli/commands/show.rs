//! `roi show` command - Pain point results and total
//!
//! The total is the number prospects trade their contact details for, so
//! it stays masked until a lead has been captured (or `--reveal` is given).

use console::style;
use miette::Result;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::helpers::{escape_csv, escape_md, load_config, load_project, truncate_str};
use crate::cli::output::{effective_format, print_structured};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::format::CurrencyFormat;
use crate::core::results::PainResult;
use crate::core::session::{Session, SessionStore};

const MASK: &str = "••,••,•••";

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Print the total even though no lead has been submitted yet
    #[arg(long)]
    pub reveal: bool,
}

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "#")]
    id: u8,
    #[tabled(rename = "Pain point")]
    title: String,
    #[tabled(rename = "Monthly loss")]
    monthly: String,
    #[tabled(rename = "Annual loss")]
    annual: String,
    #[tabled(rename = "Included")]
    selected: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResultsView<'a> {
    results: &'a [PainResult],
    selected_count: usize,
    revealed: bool,
    total: Option<f64>,
}

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = load_project()?;
    let config = load_config(&project)?;
    let session = SessionStore::load_or_default(&project);
    let reveal = args.reveal || session.is_revealed();
    print_results(&session, reveal, global.output, &config.currency())
}

/// Print the results in the requested format
pub fn print_results(
    session: &Session,
    reveal: bool,
    format: OutputFormat,
    currency: &CurrencyFormat,
) -> Result<()> {
    let format = effective_format(format);
    let total = session.total();
    let view = ResultsView {
        results: &session.results,
        selected_count: session.selected_count(),
        revealed: reveal,
        total: reveal.then_some(total),
    };
    if print_structured(&view, format)? {
        return Ok(());
    }

    let shown_total = if reveal {
        currency.format(total)
    } else {
        format!("{}{}", currency.symbol(), MASK)
    };

    match format {
        OutputFormat::Csv => {
            println!("id,title,monthly_loss,annual_loss,selected");
            for r in &session.results {
                println!(
                    "{},{},{},{},{}",
                    r.id,
                    escape_csv(&r.title),
                    r.monthly_loss,
                    r.annual_loss,
                    r.is_selected
                );
            }
        }
        OutputFormat::Md => {
            println!("| # | Pain point | Monthly loss | Annual loss | Included |");
            println!("|---|------------|--------------|-------------|----------|");
            for r in &session.results {
                println!(
                    "| {} | {} | {} | {} | {} |",
                    r.id,
                    escape_md(&r.title),
                    currency.format(r.monthly_loss),
                    currency.format(r.annual_loss),
                    if r.is_selected { "yes" } else { "no" }
                );
            }
            println!();
            println!("**Total annual impact:** {}", shown_total);
        }
        _ => {
            let rows: Vec<ResultRow> = session
                .results
                .iter()
                .map(|r| ResultRow {
                    id: r.id.number(),
                    title: truncate_str(&r.title, 40),
                    monthly: currency.format(r.monthly_loss),
                    annual: currency.format(r.annual_loss),
                    selected: if r.is_selected { "✓" } else { "" }.to_string(),
                })
                .collect();
            println!("{}", Table::new(rows).with(Style::rounded()));
            println!();
            println!(
                "{} ({} of {} pain points)",
                style("Total annual impact").bold(),
                session.selected_count(),
                session.results.len()
            );
            if reveal {
                println!("  {}", style(shown_total).green().bold());
            } else {
                println!("  {}", style(shown_total).dim());
                println!();
                println!(
                    "Submit your details with {} to see your total and get the report.",
                    style("roi submit").cyan()
                );
            }
        }
    }
    Ok(())
}
