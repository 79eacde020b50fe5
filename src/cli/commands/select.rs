//! `roi toggle` / `roi select` / `roi deselect` - Choose which pain points
//! count towards the total

use console::style;
use miette::Result;

use crate::cli::helpers::{load_project, parse_pain_ids, update_session};
use crate::cli::GlobalOpts;
use crate::core::pain::PainId;
use crate::core::session::{Session, SessionEvent};

#[derive(clap::Args, Debug)]
pub struct SelectionArgs {
    /// Pain point ids (1-6), or `all`
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,
}

pub fn run_toggle(args: SelectionArgs, global: &GlobalOpts) -> Result<()> {
    let project = load_project()?;
    let ids = parse_pain_ids(&args.ids)?;
    let session = update_session(&project, ids.iter().map(|id| SessionEvent::Toggle(*id)))?;
    report(&session, &ids, global);
    Ok(())
}

pub fn run_select(args: SelectionArgs, global: &GlobalOpts, selected: bool) -> Result<()> {
    let project = load_project()?;
    let ids = parse_pain_ids(&args.ids)?;
    let events: Vec<SessionEvent> = if ids.len() == PainId::ALL.len() {
        vec![SessionEvent::SelectAll(selected)]
    } else {
        ids.iter().map(|id| SessionEvent::Select(*id, selected)).collect()
    };
    let session = update_session(&project, events)?;
    report(&session, &ids, global);
    Ok(())
}

fn report(session: &Session, ids: &[PainId], global: &GlobalOpts) {
    if global.quiet {
        return;
    }
    for id in ids {
        if let Some(r) = session.result(*id) {
            let mark = if r.is_selected {
                style("✓ included").green()
            } else {
                style("✗ excluded").dim()
            };
            println!("{} {}: {}", mark, r.id, r.title);
        }
    }
    println!(
        "{} of {} pain points included",
        style(session.selected_count()).cyan(),
        session.results.len()
    );
}
