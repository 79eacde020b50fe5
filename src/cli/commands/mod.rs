//! CLI command implementations

pub mod completions;
pub mod explain;
pub mod fields;
pub mod init;
pub mod report;
pub mod reset;
pub mod select;
pub mod set;
pub mod show;
pub mod submit;
pub mod wizard;
