//! Calculator session
//!
//! A [`Session`] is everything the calculator knows about one prospect: the
//! questionnaire position, the inputs, the computed results with their
//! selection, and the lead once it has been captured. Every change goes
//! through [`Session::apply`].

use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

use crate::core::calc::{calculate_all_pains, calculate_total};
use crate::core::inputs::{AllInputs, InputField};
use crate::core::pain::PainId;
use crate::core::project::Project;
use crate::core::results::{self, merge_selection, PainResult};
use crate::core::wizard;
use crate::lead::Lead;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to write session cache {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize session: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Pain point {0} is not in the current results")]
    UnknownPain(PainId),
}

/// A change to the session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SetInput(InputField, f64),
    ReplaceInputs(AllInputs),
    Toggle(PainId),
    Select(PainId, bool),
    SelectAll(bool),
    AdvanceStep,
    RetreatStep,
    ResetStep,
    CaptureLead(Lead),
    Reset,
}

/// Calculator state for one prospect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Questionnaire position, `0..=STEPS.len()`; the last value means done
    #[serde(default)]
    pub step: usize,

    #[serde(default)]
    pub inputs: AllInputs,

    #[serde(default)]
    pub results: Vec<PainResult>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead: Option<Lead>,
}

impl Default for Session {
    fn default() -> Self {
        let inputs = AllInputs::default();
        Self {
            step: 0,
            results: calculate_all_pains(&inputs),
            inputs,
            lead: None,
        }
    }
}

impl Session {
    /// Apply one event
    pub fn apply(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        match event {
            SessionEvent::SetInput(field, value) => {
                field.set(&mut self.inputs, value);
                self.recompute();
            }
            SessionEvent::ReplaceInputs(inputs) => {
                self.inputs = inputs;
                self.recompute();
            }
            SessionEvent::Toggle(id) => {
                results::toggle(&mut self.results, id).ok_or(SessionError::UnknownPain(id))?;
            }
            SessionEvent::Select(id, selected) => {
                if !results::set_selected(&mut self.results, id, selected) {
                    return Err(SessionError::UnknownPain(id));
                }
            }
            SessionEvent::SelectAll(selected) => {
                results::set_all_selected(&mut self.results, selected);
            }
            SessionEvent::AdvanceStep => {
                self.step = (self.step + 1).min(wizard::step_count());
            }
            SessionEvent::RetreatStep => {
                self.step = self.step.saturating_sub(1);
            }
            SessionEvent::ResetStep => self.step = 0,
            SessionEvent::CaptureLead(lead) => self.lead = Some(lead),
            SessionEvent::Reset => *self = Session::default(),
        }
        Ok(())
    }

    /// Recompute results from the inputs, keeping the current selection
    fn recompute(&mut self) {
        let fresh = calculate_all_pains(&self.inputs);
        self.results = merge_selection(&self.results, fresh);
    }

    /// Sum of annual losses over selected pain points
    pub fn total(&self) -> f64 {
        calculate_total(&self.results)
    }

    pub fn result(&self, id: PainId) -> Option<&PainResult> {
        results::find(&self.results, id)
    }

    pub fn selected_count(&self) -> usize {
        results::selected_count(&self.results)
    }

    /// The questionnaire has been completed
    pub fn wizard_done(&self) -> bool {
        self.step >= wizard::step_count()
    }

    /// The total may be shown once a lead has been captured
    pub fn is_revealed(&self) -> bool {
        self.lead.is_some()
    }
}

// =========================================================================
// Session cache
// =========================================================================

/// Reads and writes the session cache under `.roi/session.json`
pub struct SessionStore;

impl SessionStore {
    /// Load the cached session. A missing, unreadable or corrupt cache is
    /// treated as no session.
    ///
    /// Results are recomputed from the stored inputs; only the stored
    /// selection is carried over.
    pub fn load(project: &Project) -> Option<Session> {
        let path = project.session_path();
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("Ignoring unreadable session cache {}: {}", path.display(), e);
                return None;
            }
        };

        let mut session: Session = match serde_json::from_str(&content) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Ignoring corrupt session cache {}: {}", path.display(), e);
                return None;
            }
        };

        session.step = session.step.min(wizard::step_count());
        session.recompute();
        log::debug!("Loaded session from {}", path.display());
        Some(session)
    }

    /// Load the cached session or start a fresh one
    pub fn load_or_default(project: &Project) -> Session {
        Self::load(project).unwrap_or_default()
    }

    /// Overwrite the cache with `session`
    pub fn save(project: &Project, session: &Session) -> Result<(), SessionError> {
        let path = project.session_path();
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&path, json).map_err(|source| SessionError::Write {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("Saved session to {}", path.display());
        Ok(())
    }

    /// Remove the cache; a missing file is not an error
    pub fn clear(project: &Project) -> Result<(), SessionError> {
        let path = project.session_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Write {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}
