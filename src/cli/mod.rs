//! CLI module - argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod helpers;
pub mod output;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat};

use miette::Result;

/// Run the parsed command
pub fn dispatch(cli: Cli) -> Result<()> {
    let global = cli.global;
    match cli.command {
        Commands::Init(args) => commands::init::run(args, &global),
        Commands::Wizard(args) => commands::wizard::run(args, &global),
        Commands::Set(args) => commands::set::run(args, &global),
        Commands::Fields(args) => commands::fields::run(args, &global),
        Commands::Show(args) => commands::show::run(args, &global),
        Commands::Toggle(args) => commands::select::run_toggle(args, &global),
        Commands::Select(args) => commands::select::run_select(args, &global, true),
        Commands::Deselect(args) => commands::select::run_select(args, &global, false),
        Commands::Explain(args) => commands::explain::run(args, &global),
        Commands::Submit(args) => commands::submit::run(args, &global),
        Commands::Report(args) => commands::report::run(args, &global),
        Commands::Reset(args) => commands::reset::run(args, &global),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
