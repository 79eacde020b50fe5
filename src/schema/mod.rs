//! Embedded JSON schemas

pub mod registry;

pub use registry::{SchemaError, SchemaRegistry, SUBMISSION_SCHEMA};
