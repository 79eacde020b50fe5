//! `roi reset` command - Start over

use console::style;
use miette::Result;

use crate::cli::helpers::{load_project, update_session};
use crate::cli::GlobalOpts;
use crate::core::session::SessionEvent;

#[derive(clap::Args, Debug)]
pub struct ResetArgs {}

pub fn run(_args: ResetArgs, global: &GlobalOpts) -> Result<()> {
    let project = load_project()?;
    update_session(&project, [SessionEvent::Reset])?;
    if !global.quiet {
        println!(
            "{} Inputs, selections and lead reset to defaults",
            style("✓").green()
        );
    }
    Ok(())
}
