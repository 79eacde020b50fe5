//! `roi submit` command - Capture the prospect's details
//!
//! Two modes: the lead form (flags, prompting for anything missing on a
//! terminal) submits the current session; `--body` processes a raw request
//! body exactly like the submission endpoint and prints its JSON response.

use chrono::Utc;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::commands::show::print_results;
use crate::cli::helpers::{apply, load_config, load_project, read_input, save_session};
use crate::cli::output::{effective_format, print_structured};
use crate::cli::GlobalOpts;
use crate::core::session::{SessionEvent, SessionStore};
use crate::lead::form::Lead;
use crate::lead::sink::{configured_sinks, LeadSink};
use crate::lead::submission::{handle_submission, submit, SheetsStatus, SubmissionData, SubmitResponse};

/// Lead form fields, shared with `roi report`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct LeadArgs {
    /// Your name
    #[arg(long)]
    pub name: Option<String>,

    /// Position / designation
    #[arg(long)]
    pub position: Option<String>,

    /// Company name
    #[arg(long)]
    pub company: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Dialling code, e.g. +91
    #[arg(long)]
    pub country_code: Option<String>,

    /// Quotation wanted (repeatable), e.g. "Lab Raffia Tape Line"
    #[arg(long = "quotation-type")]
    pub quotation_type: Vec<String>,
}

impl LeadArgs {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.position.is_none()
            && self.company.is_none()
            && self.phone.is_none()
            && self.email.is_none()
    }

    pub fn to_lead(&self) -> Lead {
        let mut lead = Lead::new(
            self.name.clone().unwrap_or_default(),
            self.position.clone().unwrap_or_default(),
            self.company.clone().unwrap_or_default(),
            self.phone.clone().unwrap_or_default(),
            self.email.clone().unwrap_or_default(),
        );
        lead.country_code = self.country_code.clone();
        lead.quotation_types = self.quotation_type.clone();
        lead
    }
}

#[derive(clap::Args, Debug)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub lead: LeadArgs,

    /// Process a raw JSON request body (file path, or - for stdin)
    #[arg(long, conflicts_with_all = ["name", "position", "company", "phone", "email"])]
    pub body: Option<PathBuf>,
}

pub fn run(args: SubmitArgs, global: &GlobalOpts) -> Result<()> {
    let project = load_project()?;
    let config = load_config(&project)?;
    let sinks = configured_sinks(&config, Some(&project));
    let sink_refs: Vec<&dyn LeadSink> = sinks.iter().map(|s| s.as_ref()).collect();

    if let Some(path) = &args.body {
        let body = read_input(path)?;
        let outcome = handle_submission(&body, &sink_refs, Utc::now());
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome.response).into_diagnostic()?
        );
        if !outcome.is_success() {
            return Err(miette::miette!(
                "Submission rejected ({}): {}",
                outcome.status,
                outcome.response.message
            ));
        }
        return Ok(());
    }

    let mut lead = args.lead.to_lead();
    if console::user_attended() && !global.quiet {
        prompt_missing(&mut lead)?;
    }
    lead.validate().map_err(|e| miette::miette!("{}", e))?;

    let mut session = SessionStore::load_or_default(&project);
    let data = SubmissionData::new(lead.clone(), session.inputs.clone(), session.results.clone());
    let response = submit(&data, &sink_refs, Utc::now());

    apply(&mut session, SessionEvent::CaptureLead(lead))?;
    save_session(&project, &session)?;

    let format = effective_format(global.output);
    if print_structured(&response, format)? {
        return Ok(());
    }
    if !global.quiet {
        print_status(&response);
        println!();
        print_results(&session, true, format, &config.currency())?;
        println!();
        println!("Run {} to write your report.", style("roi report").cyan());
    }
    Ok(())
}

/// Ask for every blank form field
fn prompt_missing(lead: &mut Lead) -> Result<()> {
    let theme = ColorfulTheme::default();
    for (label, value) in [
        ("Name", &mut lead.name),
        ("Position", &mut lead.position),
        ("Company name", &mut lead.company),
        ("Phone number", &mut lead.phone),
        ("Email", &mut lead.email),
    ] {
        if value.trim().is_empty() {
            *value = Input::<String>::with_theme(&theme)
                .with_prompt(label)
                .interact_text()
                .into_diagnostic()?;
        }
    }
    Ok(())
}

fn print_status(response: &SubmitResponse) {
    println!("{} {}", style("✓").green(), response.message);
    match response.sheets_status {
        Some(SheetsStatus::Success) => {
            for d in &response.deliveries {
                println!("  {} delivered to {}", style("•").dim(), d.sink);
            }
        }
        Some(SheetsStatus::Failed) => {
            println!(
                "  {} Lead recording failed: {}",
                style("!").yellow(),
                style(response.sheets_error.as_deref().unwrap_or("unknown error")).yellow()
            );
        }
        Some(SheetsStatus::NotConfigured) | None => {
            println!(
                "  {} No webhook or ledger configured; the lead was not recorded",
                style("!").dim()
            );
        }
    }
}
