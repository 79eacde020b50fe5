//! Lead submission handling
//!
//! A submission is accepted as soon as the lead is valid. Delivery to the
//! configured sinks happens afterwards and its outcome is reported as a soft
//! status next to `success: true`; a broken webhook never costs the
//! prospect their report.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::core::calc::calculate_total;
use crate::core::inputs::AllInputs;
use crate::core::pain::PainId;
use crate::core::results::{find, selected_count, PainResult};
use crate::lead::form::{Lead, LeadField};
use crate::lead::sink::LeadSink;
use crate::schema::{SchemaError, SchemaRegistry, SUBMISSION_SCHEMA};

pub const INVALID_BODY: &str = "Invalid submission body";
pub const MISSING_FIELDS: &str = "Missing required fields";
pub const SUBMITTED: &str = "Form submitted successfully";

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Invalid submission body: {}", .0.join("; "))]
    InvalidBody(Vec<String>),

    #[error("Missing required fields: {}", field_list(.0))]
    MissingFields(Vec<LeadField>),
}

fn field_list(fields: &[LeadField]) -> String {
    fields
        .iter()
        .map(LeadField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Request body of the submission endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionData {
    pub lead: Lead,
    pub inputs: AllInputs,
    pub results: Vec<PainResult>,
    /// Client-computed total; recomputed from `results` when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

impl SubmissionData {
    pub fn new(lead: Lead, inputs: AllInputs, results: Vec<PainResult>) -> Self {
        let total = calculate_total(&results);
        Self {
            lead,
            inputs,
            results,
            total: Some(total),
        }
    }

    pub fn total(&self) -> f64 {
        self.total.unwrap_or_else(|| calculate_total(&self.results))
    }
}

// =========================================================================
// Outbound payload
// =========================================================================

/// One pain point as a spreadsheet row fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PainPayload {
    /// `"YES"` or `"NO"`
    pub selected: String,
    pub annual_loss: f64,
    pub monthly_loss: f64,
}

impl PainPayload {
    fn from_result(result: Option<&PainResult>) -> Self {
        match result {
            Some(r) => Self {
                selected: if r.is_selected { "YES" } else { "NO" }.to_string(),
                annual_loss: r.annual_loss,
                monthly_loss: r.monthly_loss,
            },
            None => Self {
                selected: "NO".to_string(),
                annual_loss: 0.0,
                monthly_loss: 0.0,
            },
        }
    }
}

/// Flattened submission in the shape the Apps Script expects
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetsPayload {
    pub timestamp: String,
    #[serde(serialize_with = "serialize_lead")]
    pub lead: Lead,
    pub total: f64,
    pub inputs: AllInputs,
    pub pain1: PainPayload,
    pub pain2: PainPayload,
    pub pain3: PainPayload,
    pub pain4: PainPayload,
    pub pain5: PainPayload,
    pub pain6: PainPayload,
}

/// The sheet keeps quotation types in a single cell
fn serialize_lead<S: Serializer>(lead: &Lead, serializer: S) -> Result<S::Ok, S::Error> {
    let mut value = serde_json::to_value(lead).map_err(serde::ser::Error::custom)?;
    if let Some(obj) = value.as_object_mut() {
        if !lead.quotation_types.is_empty() {
            obj.insert(
                "quotationTypes".to_string(),
                lead.quotation_types_joined().into(),
            );
        }
    }
    value.serialize(serializer)
}

impl SheetsPayload {
    pub fn new(
        lead: &Lead,
        inputs: &AllInputs,
        results: &[PainResult],
        total: f64,
        now: DateTime<Utc>,
    ) -> Self {
        let pain = |id| PainPayload::from_result(find(results, id));
        Self {
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            lead: lead.clone(),
            total,
            inputs: *inputs,
            pain1: pain(PainId::Pain1),
            pain2: pain(PainId::Pain2),
            pain3: pain(PainId::Pain3),
            pain4: pain(PainId::Pain4),
            pain5: pain(PainId::Pain5),
            pain6: pain(PainId::Pain6),
        }
    }

    pub fn pain(&self, id: PainId) -> &PainPayload {
        match id {
            PainId::Pain1 => &self.pain1,
            PainId::Pain2 => &self.pain2,
            PainId::Pain3 => &self.pain3,
            PainId::Pain4 => &self.pain4,
            PainId::Pain5 => &self.pain5,
            PainId::Pain6 => &self.pain6,
        }
    }
}

// =========================================================================
// Response
// =========================================================================

/// Outcome of delivering to the sinks, as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetsStatus {
    Success,
    Failed,
    NotConfigured,
}

impl std::fmt::Display for SheetsStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetsStatus::Success => write!(f, "success"),
            SheetsStatus::Failed => write!(f, "failed"),
            SheetsStatus::NotConfigured => write!(f, "not_configured"),
        }
    }
}

/// Outcome of one sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryStatus {
    pub sink: String,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response body of the submission endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheets_status: Option<SheetsStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheets_error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deliveries: Vec<DeliveryStatus>,
    /// Machine-readable error for rejected requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl SubmitResponse {
    fn rejected(err: &SubmitError) -> Self {
        let (message, details) = match err {
            SubmitError::InvalidBody(details) => (INVALID_BODY, details.clone()),
            SubmitError::MissingFields(fields) => (
                MISSING_FIELDS,
                fields.iter().map(|f| f.as_str().to_string()).collect(),
            ),
        };
        Self {
            success: false,
            message: message.to_string(),
            sheets_status: None,
            sheets_error: None,
            deliveries: Vec::new(),
            error: Some(message.to_string()),
            details,
        }
    }
}

/// HTTP-style result of [`handle_submission`]
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub status: u16,
    pub response: SubmitResponse,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

// =========================================================================
// Handling
// =========================================================================

/// Parse and check a raw request body
pub fn parse_submission(body: &str) -> Result<SubmissionData, SubmitError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| SubmitError::InvalidBody(vec![e.to_string()]))?;

    match SchemaRegistry::new().validate(SUBMISSION_SCHEMA, &value) {
        Ok(()) => {}
        Err(SchemaError::Violations { violations, .. }) => {
            return Err(SubmitError::InvalidBody(violations))
        }
        Err(e) => return Err(SubmitError::InvalidBody(vec![e.to_string()])),
    }

    let data: SubmissionData = serde_json::from_value(value)
        .map_err(|e| SubmitError::InvalidBody(vec![e.to_string()]))?;

    let missing = data.lead.missing_required();
    if !missing.is_empty() {
        return Err(SubmitError::MissingFields(missing));
    }
    Ok(data)
}

/// Endpoint semantics: validate the body, then submit
///
/// Invalid bodies and incomplete leads answer 400 without touching any sink.
pub fn handle_submission(
    body: &str,
    sinks: &[&dyn LeadSink],
    now: DateTime<Utc>,
) -> SubmitOutcome {
    match parse_submission(body) {
        Ok(data) => SubmitOutcome {
            status: 200,
            response: submit(&data, sinks, now),
        },
        Err(err) => {
            log::warn!("Rejected submission: {}", err);
            SubmitOutcome {
                status: 400,
                response: SubmitResponse::rejected(&err),
            }
        }
    }
}

/// Deliver a validated submission to every sink, once each
pub fn submit(data: &SubmissionData, sinks: &[&dyn LeadSink], now: DateTime<Utc>) -> SubmitResponse {
    let total = data.total();
    log::info!(
        "New ROI calculator submission from {} <{}> ({}): total annual impact {}, {} pain points selected",
        data.lead.name,
        data.lead.email,
        data.lead.company,
        total,
        selected_count(&data.results)
    );

    let payload = SheetsPayload::new(&data.lead, &data.inputs, &data.results, total, now);

    let deliveries: Vec<DeliveryStatus> = sinks
        .iter()
        .map(|sink| match sink.deliver(&payload) {
            Ok(()) => {
                log::info!("Delivered submission to {}", sink.name());
                DeliveryStatus {
                    sink: sink.name().to_string(),
                    ok: true,
                    error: None,
                }
            }
            Err(e) => {
                log::error!("Delivery to {} failed: {}", sink.name(), e);
                DeliveryStatus {
                    sink: sink.name().to_string(),
                    ok: false,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect();

    let errors: Vec<String> = deliveries
        .iter()
        .filter_map(|d| d.error.as_ref().map(|e| format!("{}: {}", d.sink, e)))
        .collect();

    let (sheets_status, sheets_error) = if deliveries.is_empty() {
        log::warn!("No lead sink configured; submission was not recorded");
        (SheetsStatus::NotConfigured, None)
    } else if errors.is_empty() {
        (SheetsStatus::Success, None)
    } else {
        (SheetsStatus::Failed, Some(errors.join("; ")))
    };

    SubmitResponse {
        success: true,
        message: SUBMITTED.to_string(),
        sheets_status: Some(sheets_status),
        sheets_error,
        deliveries,
        error: None,
        details: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calc::calculate_all_pains;
    use crate::core::results::toggle;
    use crate::lead::sink::SinkError;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::cell::RefCell;

    /// Records payloads; optionally fails every delivery
    struct RecordingSink {
        name: &'static str,
        fail: bool,
        seen: RefCell<Vec<SheetsPayload>>,
    }

    impl RecordingSink {
        fn new(name: &'static str, fail: bool) -> Self {
            Self {
                name,
                fail,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl LeadSink for RecordingSink {
        fn name(&self) -> &str {
            self.name
        }

        fn deliver(&self, payload: &SheetsPayload) -> Result<(), SinkError> {
            self.seen.borrow_mut().push(payload.clone());
            if self.fail {
                Err(SinkError::Status {
                    code: 500,
                    body: "script error".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap()
    }

    fn lead() -> Lead {
        Lead::new("Asha", "Manager", "Acme", "+91 98765 43210", "a@acme.example")
    }

    fn body() -> String {
        let inputs = AllInputs::default();
        let mut results = calculate_all_pains(&inputs);
        toggle(&mut results, PainId::Pain4);
        serde_json::to_string(&SubmissionData::new(lead(), inputs, results)).unwrap()
    }

    #[test]
    fn test_payload_shape() {
        let inputs = AllInputs::default();
        let mut results = calculate_all_pains(&inputs);
        toggle(&mut results, PainId::Pain2);
        let mut lead = lead();
        lead.quotation_types = vec!["Lab Line".to_string(), "Spare Parts".to_string()];

        let payload = SheetsPayload::new(&lead, &inputs, &results, 1.0, now());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["timestamp"], "2026-10-19T09:30:00.000Z");
        assert_eq!(json["total"], 1.0);
        assert_eq!(json["lead"]["quotationTypes"], "Lab Line, Spare Parts");
        assert_eq!(json["inputs"]["factory"]["outputPerHour"], 200.0);
        assert_eq!(
            json["pain1"],
            json!({"selected": "YES", "annualLoss": 792000.0, "monthlyLoss": 66000.0})
        );
        assert_eq!(json["pain2"]["selected"], "NO");
        assert_eq!(json["pain2"]["annualLoss"], 1320000.0);
    }

    #[test]
    fn test_payload_missing_pain_is_no() {
        let mut results = calculate_all_pains(&AllInputs::default());
        results.retain(|r| r.id != PainId::Pain6);
        let payload = SheetsPayload::new(&lead(), &AllInputs::default(), &results, 0.0, now());
        assert_eq!(payload.pain6.selected, "NO");
        assert_eq!(payload.pain6.annual_loss, 0.0);
    }

    #[test]
    fn test_success_with_sink() {
        let sink = RecordingSink::new("webhook", false);
        let outcome = handle_submission(&body(), &[&sink], now());

        assert_eq!(outcome.status, 200);
        assert!(outcome.response.success);
        assert_eq!(outcome.response.message, "Form submitted successfully");
        assert_eq!(outcome.response.sheets_status, Some(SheetsStatus::Success));
        assert_eq!(outcome.response.sheets_error, None);

        let seen = sink.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].total, 3_632_000.0 - 75_000.0);
        assert_eq!(seen[0].pain4.selected, "NO");
    }

    #[test]
    fn test_failing_sink_still_succeeds() {
        let broken = RecordingSink::new("webhook", true);
        let ledger = RecordingSink::new("ledger", false);
        let outcome = handle_submission(&body(), &[&broken, &ledger], now());

        assert_eq!(outcome.status, 200);
        assert!(outcome.response.success);
        assert_eq!(outcome.response.sheets_status, Some(SheetsStatus::Failed));
        assert_eq!(
            outcome.response.sheets_error.as_deref(),
            Some("webhook: Webhook answered 500: script error")
        );
        assert_eq!(ledger.seen.borrow().len(), 1);
        assert!(outcome.response.deliveries[1].ok);
    }

    #[test]
    fn test_no_sinks_is_not_configured() {
        let outcome = handle_submission(&body(), &[], now());
        assert_eq!(outcome.status, 200);
        assert_eq!(
            outcome.response.sheets_status,
            Some(SheetsStatus::NotConfigured)
        );
        let json = serde_json::to_value(&outcome.response).unwrap();
        assert_eq!(json["sheets_status"], "not_configured");
    }

    #[test]
    fn test_missing_fields_rejected_without_delivery() {
        let sink = RecordingSink::new("webhook", false);
        let body = json!({
            "lead": {"name": "Asha", "email": "", "company": "Acme"},
            "results": [],
            "total": 0
        })
        .to_string();
        let outcome = handle_submission(&body, &[&sink], now());

        assert_eq!(outcome.status, 400);
        assert!(!outcome.response.success);
        assert_eq!(outcome.response.message, "Missing required fields");
        assert_eq!(outcome.response.details, vec!["email", "phone"]);
        assert!(sink.seen.borrow().is_empty());
    }

    #[test]
    fn test_missing_lead_rejected() {
        let sink = RecordingSink::new("webhook", false);
        let outcome = handle_submission(r#"{"total": 5}"#, &[&sink], now());
        assert_eq!(outcome.status, 400);
        assert_eq!(outcome.response.details.len(), 4);
        assert!(sink.seen.borrow().is_empty());
    }

    #[test]
    fn test_malformed_body_rejected() {
        let sink = RecordingSink::new("webhook", false);
        for body in ["not json", r#"{"total": "lots"}"#, r#"{"results": [{"id": 7}]}"#] {
            let outcome = handle_submission(body, &[&sink], now());
            assert_eq!(outcome.status, 400, "{}", body);
            assert_eq!(outcome.response.message, "Invalid submission body");
            assert!(!outcome.response.details.is_empty());
        }
        assert!(sink.seen.borrow().is_empty());
    }

    #[test]
    fn test_total_recomputed_when_absent() {
        let results = calculate_all_pains(&AllInputs::default());
        let data = SubmissionData {
            lead: lead(),
            inputs: AllInputs::default(),
            results,
            total: None,
        };
        assert_eq!(data.total(), 3_632_000.0);
    }
}
