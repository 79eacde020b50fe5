//! Lead capture and submission delivery

pub mod form;
pub mod sink;
pub mod submission;

pub use form::{FieldError, Lead, LeadField, LeadValidationError};
pub use sink::{configured_sinks, CsvLedger, LeadSink, SinkError, WebhookSink};
pub use submission::{
    handle_submission, parse_submission, submit, DeliveryStatus, PainPayload, SheetsPayload,
    SheetsStatus, SubmissionData, SubmitError, SubmitOutcome, SubmitResponse,
};
