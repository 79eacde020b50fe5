//! `roi wizard` command - Factory settings questionnaire
//!
//! Progress is saved after every answer, so an interrupted questionnaire
//! resumes where it stopped.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::show;
use crate::cli::helpers::{apply, load_config, load_project, save_session};
use crate::cli::GlobalOpts;
use crate::core::session::{SessionEvent, SessionStore};
use crate::core::wizard::{WizardStep, STEPS};

#[derive(clap::Args, Debug)]
pub struct WizardArgs {
    /// Accept the current or default value for every question
    #[arg(long)]
    pub defaults: bool,

    /// Start again from the first question
    #[arg(long)]
    pub restart: bool,
}

pub fn run(args: WizardArgs, global: &GlobalOpts) -> Result<()> {
    let project = load_project()?;
    let config = load_config(&project)?;
    let currency = config.currency();
    let theme = ColorfulTheme::default();

    let mut session = SessionStore::load_or_default(&project);
    if args.restart || session.wizard_done() {
        apply(&mut session, SessionEvent::ResetStep)?;
    } else if session.step > 0 && !global.quiet {
        println!(
            "{} Resuming at question {}",
            style("→").blue(),
            session.step + 1
        );
    }

    if !args.defaults && !global.quiet {
        println!(
            "{}",
            style("Answer each question, or press Enter to keep the value shown. Type < to go back.")
                .dim()
        );
    }

    while !session.wizard_done() {
        let step = STEPS[session.step];
        let prefill = step.prefill(&session.inputs);

        let value = if args.defaults {
            prefill
        } else {
            println!();
            println!(
                "{}  {}",
                style(WizardStep::progress(session.step)).dim(),
                style(step.title).bold()
            );
            println!("{}", style(step.description).dim());

            let unit = match (step.field.is_currency(), step.field.suffix()) {
                (true, Some(unit)) => format!("{}{}", currency.symbol(), unit),
                (true, None) => currency.symbol().to_string(),
                (false, Some(unit)) => unit.to_string(),
                (false, None) => String::new(),
            };
            let raw: String = Input::with_theme(&theme)
                .with_prompt(format!("{} ({})", step.field.label(), unit))
                .default(prefill.to_string())
                .allow_empty(true)
                .interact_text()
                .into_diagnostic()?;

            if matches!(raw.trim(), "<" | "back") {
                apply(&mut session, SessionEvent::RetreatStep)?;
                save_session(&project, &session)?;
                continue;
            }
            step.answer(&raw)
        };

        log::debug!("{} = {}", step.field.key(), value);
        apply(&mut session, SessionEvent::SetInput(step.field, value))?;
        apply(&mut session, SessionEvent::AdvanceStep)?;
        save_session(&project, &session)?;
    }

    if !global.quiet {
        println!();
        println!("{} Questionnaire complete", style("✓").green());
        println!();
    }
    show::print_results(&session, session.is_revealed(), global.output, &currency)
}
