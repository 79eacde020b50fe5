//! Delivery destinations for lead submissions
//!
//! Every sink gets exactly one attempt per submission. Failures are returned
//! to the caller, which records them and carries on.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;
use ulid::Ulid;

use crate::core::config::Config;
use crate::core::pain::PainId;
use crate::core::project::Project;
use crate::lead::submission::SheetsPayload;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Webhook answered {code}: {body}")]
    Status { code: u16, body: String },

    #[error("Webhook request failed: {0}")]
    Transport(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A destination for submitted leads
pub trait LeadSink {
    /// Short name used in logs and delivery reports
    fn name(&self) -> &str;

    fn deliver(&self, payload: &SheetsPayload) -> Result<(), SinkError>;
}

/// Build the sinks enabled by `config`
pub fn configured_sinks(config: &Config, project: Option<&Project>) -> Vec<Box<dyn LeadSink>> {
    let mut sinks: Vec<Box<dyn LeadSink>> = Vec::new();
    if let Some(url) = &config.webhook_url {
        sinks.push(Box::new(WebhookSink::new(url.clone(), config.webhook_timeout_secs)));
    }
    if let Some(ledger) = &config.ledger {
        let path = match project {
            Some(p) => p.resolve(ledger),
            None => ledger.clone(),
        };
        sinks.push(Box::new(CsvLedger::new(path)));
    }
    sinks
}

// =========================================================================
// Webhook
// =========================================================================

/// POSTs the payload as JSON to a webhook (an Apps Script deployment in
/// production) using the system `curl`
#[derive(Debug, Clone)]
pub struct WebhookSink {
    url: String,
    timeout_secs: u64,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            url: url.into(),
            timeout_secs,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl LeadSink for WebhookSink {
    fn name(&self) -> &str {
        "webhook"
    }

    fn deliver(&self, payload: &SheetsPayload) -> Result<(), SinkError> {
        let body = serde_json::to_string(payload)?;
        log::debug!("POST {} ({} bytes)", self.url, body.len());

        // No -L: Apps Script answers a successful POST with a redirect.
        // The body is fed on stdin, never on the argv.
        let mut child = Command::new("curl")
            .args([
                "--silent",
                "--show-error",
                "--request",
                "POST",
                "--header",
                "Content-Type: application/json",
                "--data-binary",
                "@-",
                "--max-time",
                &self.timeout_secs.to_string(),
                "--write-out",
                "\n%{http_code}",
                &self.url,
            ])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SinkError::Transport(format!("failed to run curl: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(body.as_bytes())
                .map_err(|e| SinkError::Transport(format!("failed to send body to curl: {}", e)))?;
        }
        let output = child
            .wait_with_output()
            .map_err(|e| SinkError::Transport(format!("curl did not finish: {}", e)))?;

        if !output.status.success() {
            return Err(SinkError::Transport(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let (code, response) = parse_curl_output(&stdout)?;
        check_status(code, response)
    }
}

/// Split curl's stdout into the status code written by `--write-out` and
/// the response body before it
fn parse_curl_output(stdout: &str) -> Result<(u16, &str), SinkError> {
    let (body, code) = stdout.rsplit_once('\n').unwrap_or(("", stdout));
    let code = code
        .trim()
        .parse::<u16>()
        .map_err(|_| SinkError::Transport(format!("unexpected curl output: {:?}", stdout)))?;
    Ok((code, body))
}

fn check_status(code: u16, body: &str) -> Result<(), SinkError> {
    if (200..300).contains(&code) || code == 302 {
        Ok(())
    } else {
        Err(SinkError::Status {
            code,
            body: body.trim().to_string(),
        })
    }
}

// =========================================================================
// CSV ledger
// =========================================================================

/// Appends one row per submission to a local CSV file
#[derive(Debug, Clone)]
pub struct CsvLedger {
    path: PathBuf,
}

const LEDGER_HEADER: [&str; 28] = [
    "id",
    "timestamp",
    "name",
    "position",
    "company",
    "phone",
    "email",
    "country_code",
    "quotation_types",
    "total",
    "pain1_selected",
    "pain1_annual",
    "pain1_monthly",
    "pain2_selected",
    "pain2_annual",
    "pain2_monthly",
    "pain3_selected",
    "pain3_annual",
    "pain3_monthly",
    "pain4_selected",
    "pain4_annual",
    "pain4_monthly",
    "pain5_selected",
    "pain5_annual",
    "pain5_monthly",
    "pain6_selected",
    "pain6_annual",
    "pain6_monthly",
];

impl CsvLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SinkError {
        SinkError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn row(payload: &SheetsPayload) -> Vec<String> {
        let lead = &payload.lead;
        let mut row = vec![
            Ulid::new().to_string(),
            payload.timestamp.clone(),
            lead.name.clone(),
            lead.position.clone(),
            lead.company.clone(),
            lead.phone.clone(),
            lead.email.clone(),
            lead.country_code.clone().unwrap_or_default(),
            lead.quotation_types_joined(),
            payload.total.to_string(),
        ];
        for id in PainId::ALL {
            let pain = payload.pain(id);
            row.push(pain.selected.clone());
            row.push(pain.annual_loss.to_string());
            row.push(pain.monthly_loss.to_string());
        }
        row
    }
}

impl LeadSink for CsvLedger {
    fn name(&self) -> &str {
        "ledger"
    }

    fn deliver(&self, payload: &SheetsPayload) -> Result<(), SinkError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let is_new = fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

        if is_new {
            writer.write_record(LEDGER_HEADER)?;
        }
        writer.write_record(Self::row(payload))?;
        writer.flush().map_err(|e| self.io_error(e))?;

        log::info!("Appended submission to {}", self.path.display());
        Ok(())
    }
}
