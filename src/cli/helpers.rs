//! Shared helper functions for CLI commands
//!
//! Project/session loading and small formatting helpers used by several
//! command modules.

use miette::{IntoDiagnostic, Result};
use std::io::{self, Read};
use std::path::Path;

use crate::core::config::Config;
use crate::core::pain::PainId;
use crate::core::project::Project;
use crate::core::session::{Session, SessionEvent, SessionStore};

/// Find the enclosing project
pub fn load_project() -> Result<Project> {
    Project::discover().map_err(|e| miette::miette!("{}", e))
}

/// Layered configuration for `project`
pub fn load_config(project: &Project) -> Result<Config> {
    Ok(Config::load(Some(project))?)
}

/// Apply one event, as a diagnostic on failure
pub fn apply(session: &mut Session, event: SessionEvent) -> Result<()> {
    session.apply(event).map_err(|e| miette::miette!("{}", e))
}

/// Apply events to the cached session and save it
pub fn update_session(
    project: &Project,
    events: impl IntoIterator<Item = SessionEvent>,
) -> Result<Session> {
    let mut session = SessionStore::load_or_default(project);
    for event in events {
        apply(&mut session, event)?;
    }
    save_session(project, &session)?;
    Ok(session)
}

pub fn save_session(project: &Project, session: &Session) -> Result<()> {
    SessionStore::save(project, session).map_err(|e| miette::miette!("{}", e))
}

/// Parse pain ids from the command line; `all` expands to every pain point
pub fn parse_pain_ids(raw: &[String]) -> Result<Vec<PainId>> {
    let mut ids = Vec::new();
    for item in raw {
        if item.eq_ignore_ascii_case("all") {
            return Ok(PainId::ALL.to_vec());
        }
        let id: PainId = item.parse().map_err(|e: String| miette::miette!("{}", e))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Read a file, or stdin when `path` is `-`
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).into_diagnostic()?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e))
    }
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Escape a cell for a Markdown table
pub fn escape_md(s: &str) -> String {
    s.replace('|', "\\|")
}
