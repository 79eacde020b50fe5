//! Schema registry - embedded JSON schemas

use rust_embed::Embed;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Embed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

/// Name of the lead submission body schema
pub const SUBMISSION_SCHEMA: &str = "submission";

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Schema not found: {0}")]
    NotFound(String),

    #[error("Schema {name} is not valid: {message}")]
    Invalid { name: String, message: String },

    #[error("Document does not match schema {name}: {}", .violations.join("; "))]
    Violations {
        name: String,
        violations: Vec<String>,
    },
}

/// Registry of JSON schemas for request validation
pub struct SchemaRegistry {
    schemas: HashMap<String, String>,
}

impl SchemaRegistry {
    /// Create a new schema registry with embedded schemas
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        for file in EmbeddedSchemas::iter() {
            let filename = file.as_ref();
            let Some(name) = filename.strip_suffix(".schema.json") else {
                continue;
            };
            if let Some(content) = EmbeddedSchemas::get(filename) {
                if let Ok(text) = std::str::from_utf8(&content.data) {
                    schemas.insert(name.to_string(), text.to_string());
                }
            }
        }

        Self { schemas }
    }

    /// Get the raw JSON schema by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.schemas.get(name).map(|s| s.as_str())
    }

    pub fn has_schema(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Validate `instance` against the named schema, collecting every
    /// violation
    pub fn validate(&self, name: &str, instance: &Value) -> Result<(), SchemaError> {
        let raw = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;
        let invalid = |message: String| SchemaError::Invalid {
            name: name.to_string(),
            message,
        };
        let schema: Value = serde_json::from_str(raw).map_err(|e| invalid(e.to_string()))?;
        let validator = jsonschema::validator_for(&schema).map_err(|e| invalid(e.to_string()))?;

        let violations: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| e.to_string())
            .collect();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Violations {
                name: name.to_string(),
                violations,
            })
        }
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
