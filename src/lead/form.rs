//! Lead capture form
//!
//! The lead schema is still moving (some front ends send a country code and
//! quotation types, some do not), so unknown fields are kept as-is and passed
//! through to the payload.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+\-\s()]+$").expect("phone pattern is valid"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));
static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Prospective customer's contact details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(default)]
    pub name: String,

    /// Position/designation
    #[serde(default)]
    pub position: String,

    #[serde(default)]
    pub company: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,

    /// Products the lead wants quoted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quotation_types: Vec<String>,

    /// Fields this version does not know about, preserved verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A field of the lead form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadField {
    Name,
    Position,
    Company,
    Phone,
    Email,
}

impl LeadField {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadField::Name => "name",
            LeadField::Position => "position",
            LeadField::Company => "company",
            LeadField::Phone => "phone",
            LeadField::Email => "email",
        }
    }
}

impl std::fmt::Display for LeadField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One problem with one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: LeadField,
    pub message: &'static str,
}

/// All problems found on a lead form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lead form is incomplete: {}", summarize(.errors))]
pub struct LeadValidationError {
    pub errors: Vec<FieldError>,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Lead {
    pub fn new(
        name: impl Into<String>,
        position: impl Into<String>,
        company: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            company: company.into(),
            phone: phone.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    fn value(&self, field: LeadField) -> &str {
        match field {
            LeadField::Name => &self.name,
            LeadField::Position => &self.position,
            LeadField::Company => &self.company,
            LeadField::Phone => &self.phone,
            LeadField::Email => &self.email,
        }
    }

    /// Fields the submission endpoint insists on, in the order it checks them
    pub fn missing_required(&self) -> Vec<LeadField> {
        [
            LeadField::Name,
            LeadField::Email,
            LeadField::Phone,
            LeadField::Company,
        ]
        .into_iter()
        .filter(|f| self.value(*f).trim().is_empty())
        .collect()
    }

    /// Full form validation: every field present, phone and email well formed
    pub fn validate(&self) -> Result<(), LeadValidationError> {
        let mut errors = Vec::new();
        let mut require = |field: LeadField, message: &'static str| {
            let blank = self.value(field).trim().is_empty();
            if blank {
                errors.push(FieldError { field, message });
            }
            !blank
        };

        require(LeadField::Name, "Name is required");
        require(LeadField::Position, "Position is required");
        require(LeadField::Company, "Company name is required");
        let has_phone = require(LeadField::Phone, "Phone number is required");
        let has_email = require(LeadField::Email, "Email is required");

        if has_phone && !PHONE_RE.is_match(&self.phone) {
            errors.push(FieldError {
                field: LeadField::Phone,
                message: "Invalid phone number",
            });
        }
        if has_email && !EMAIL_RE.is_match(&self.email) {
            errors.push(FieldError {
                field: LeadField::Email,
                message: "Invalid email address",
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(LeadValidationError { errors })
        }
    }

    /// Quotation types as a single spreadsheet cell
    pub fn quotation_types_joined(&self) -> String {
        self.quotation_types.join(", ")
    }

    /// File name (without extension) for this lead's report
    pub fn report_file_stem(&self, date: NaiveDate) -> String {
        let company = WHITESPACE_RE.replace_all(self.company.trim(), "_");
        let company = company.replace(['/', '\\'], "_");
        format!("Neptune_ROI_Report_{}_{}", company, date.format("%Y-%m-%d"))
    }
}
