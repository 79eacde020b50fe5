//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    completions::CompletionsArgs, explain::ExplainArgs, fields::FieldsArgs, init::InitArgs,
    report::ReportArgs, reset::ResetArgs, select::SelectionArgs, set::SetArgs, show::ShowArgs,
    submit::SubmitArgs, wizard::WizardArgs,
};

#[derive(Parser, Debug)]
#[command(name = "roi")]
#[command(author, version, about = "Lab ROI calculator for masterbatch and plastics producers")]
#[command(long_about = "Estimate what production-line trials cost a factory each year, \
    capture the prospect's details and produce a shareable ROI report.\n\n\
    State is kept per project in a .roi/ directory; run `roi init` to create one.")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every command
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long = "format", short = 'f', global = true, value_enum, default_value = "auto")]
    pub output: OutputFormat,

    /// More log output (-v info, -vv debug)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pick a format for the command (usually table)
    #[default]
    Auto,
    Table,
    Json,
    Yaml,
    Csv,
    /// Markdown table
    Md,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a .roi/ project in the current directory
    Init(InitArgs),

    /// Answer the factory settings questionnaire
    Wizard(WizardArgs),

    /// Change one or more inputs (`key=value` or `key value`)
    Set(SetArgs),

    /// List editable inputs with current values and defaults
    Fields(FieldsArgs),

    /// Show the pain point results and the total
    Show(ShowArgs),

    /// Flip selection of pain points
    Toggle(SelectionArgs),

    /// Include pain points in the total (`all` for every one)
    Select(SelectionArgs),

    /// Exclude pain points from the total (`all` for every one)
    Deselect(SelectionArgs),

    /// Explain a pain point and how its loss is calculated
    Explain(ExplainArgs),

    /// Submit your details to unlock the total and the report
    Submit(SubmitArgs),

    /// Write the ROI report (Markdown or HTML)
    Report(ReportArgs),

    /// Forget all inputs, selections and the captured lead
    Reset(ResetArgs),

    /// Print shell completions
    Completions(CompletionsArgs),
}
