//! `roi report` command - Write the ROI report

use chrono::Local;
use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::commands::submit::LeadArgs;
use crate::cli::helpers::{load_config, load_project};
use crate::cli::GlobalOpts;
use crate::core::session::SessionStore;
use crate::report::{write_report, ReportData, ReportFormat, ReportOptions, ReportRenderer};

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    /// Markdown output (the default)
    #[arg(long, conflicts_with = "html")]
    pub md: bool,

    /// Standalone HTML output
    #[arg(long)]
    pub html: bool,

    /// Directory to write into (default: report_dir from config)
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// Report for this lead instead of the one captured by `roi submit`
    #[command(flatten)]
    pub lead: LeadArgs,
}

pub fn run(args: ReportArgs, global: &GlobalOpts) -> Result<()> {
    let project = load_project()?;
    let config = load_config(&project)?;
    let session = SessionStore::load_or_default(&project);

    let lead = if !args.lead.is_empty() {
        let lead = args.lead.to_lead();
        lead.validate().map_err(|e| miette::miette!("{}", e))?;
        lead
    } else {
        session.lead.clone().ok_or_else(|| {
            miette::miette!(
                help = "Run `roi submit` first, or pass --name/--company etc.",
                "No lead captured yet"
            )
        })?
    };

    let format = if args.html {
        ReportFormat::Html
    } else {
        ReportFormat::Markdown
    };
    let dir = args
        .out
        .unwrap_or_else(|| project.resolve(&config.report_dir));

    let data = ReportData::from_session(&session, lead);
    let options = ReportOptions::from_config(&config, Some(&project), Local::now().date_naive());
    let renderer = ReportRenderer::new(config.currency()).map_err(|e| miette::miette!("{}", e))?;
    let path = write_report(&renderer, &data, &options, format, &dir)
        .map_err(|e| miette::miette!("{}", e))?;

    if global.quiet {
        return Ok(());
    }
    println!("{} Wrote {}", style("✓").green(), style(path.display()).cyan());
    Ok(())
}
