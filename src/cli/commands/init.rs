//! `roi init` command - Create a project

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::project::Project;
use crate::core::session::SessionStore;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Reinitialize an existing project (overwrites config, clears the session)
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    let project = Project::init(&cwd, args.force).map_err(|e| miette::miette!("{}", e))?;

    if args.force {
        SessionStore::clear(&project).map_err(|e| miette::miette!("{}", e))?;
    }

    if !global.quiet {
        println!(
            "{} Initialized ROI project in {}",
            style("✓").green(),
            style(project.meta_dir().display()).cyan()
        );
        println!();
        println!("Next steps:");
        println!("  {}  answer the factory questionnaire", style("roi wizard").cyan());
        println!("  {}    review the estimated losses", style("roi show").cyan());
    }
    Ok(())
}
