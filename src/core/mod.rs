//! Core module - calculator engine, session state and project plumbing

pub mod calc;
pub mod config;
pub mod format;
pub mod inputs;
pub mod pain;
pub mod project;
pub mod results;
pub mod session;
pub mod wizard;

pub use calc::{calculate_all_pains, calculate_pain, calculate_total, LossEstimate};
pub use config::{Config, ConfigError, VendorInfo};
pub use format::{format_currency, format_number, CurrencyFormat};
pub use inputs::{AllInputs, FactorySettings, InputField};
pub use pain::PainId;
pub use project::{Project, ProjectError};
pub use results::PainResult;
pub use session::{Session, SessionError, SessionEvent, SessionStore};
