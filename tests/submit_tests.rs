//! Lead capture: the form, the raw endpoint body and the CSV ledger

mod common;

use common::{roi_in, setup_project_with_ledger, setup_test_project, stdout_json, LEAD_ARGS};
use predicates::prelude::*;
use pretty_assertions::assert_eq;

const VALID_BODY: &str = r#"{
  "lead": {
    "name": "Ravi Shah",
    "position": "Owner",
    "company": "Shah Polymers",
    "phone": "+91 90000 00000",
    "email": "ravi@shah.example",
    "quotationTypes": ["Lab Raffia Tape Line", "Lab Extruder"]
  },
  "inputs": { "factory": { "outputPerHour": 200 } },
  "results": [
    { "id": 1, "annualLoss": 792000, "monthlyLoss": 66000, "isSelected": true },
    { "id": 2, "annualLoss": 1320000, "monthlyLoss": 110000, "isSelected": false }
  ],
  "total": 792000
}"#;

// ============================================================================
// Lead form
// ============================================================================

#[test]
fn test_submit_reveals_total_and_records_lead() {
    let tmp = setup_project_with_ledger();
    roi_in(tmp.path())
        .arg("submit")
        .args(LEAD_ARGS)
        .assert()
        .success()
        .stdout(predicate::str::contains("Form submitted successfully"))
        .stdout(predicate::str::contains("delivered to ledger"))
        .stdout(predicate::str::contains("₹36,32,000"));

    let ledger = std::fs::read_to_string(tmp.path().join("leads.csv")).unwrap();
    let lines: Vec<&str> = ledger.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("id,timestamp,name"));
    assert!(lines[1].contains("Asha Mehta"));
    assert!(lines[1].contains("YES"));

    // Total stays revealed once a lead is captured
    roi_in(tmp.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("₹36,32,000"));
}

#[test]
fn test_submit_appends_to_ledger() {
    let tmp = setup_project_with_ledger();
    roi_in(tmp.path()).arg("submit").args(LEAD_ARGS).assert().success();
    roi_in(tmp.path()).args(["deselect", "3"]).assert().success();
    roi_in(tmp.path()).arg("submit").args(LEAD_ARGS).assert().success();

    let ledger = std::fs::read_to_string(tmp.path().join("leads.csv")).unwrap();
    assert_eq!(ledger.lines().count(), 3);
    assert_eq!(ledger.lines().filter(|l| l.starts_with("id,")).count(), 1);
}

#[test]
fn test_submit_without_sink_still_succeeds() {
    let tmp = setup_test_project();
    let output = roi_in(tmp.path())
        .arg("submit")
        .args(LEAD_ARGS)
        .args(["-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["success"], true);
    assert_eq!(json["sheets_status"], "not_configured");
}

#[test]
fn test_submit_unreachable_webhook_reports_failure() {
    let tmp = setup_test_project();
    let output = roi_in(tmp.path())
        .env("ROI_WEBHOOK_URL", "http://127.0.0.1:9/exec")
        .arg("submit")
        .args(LEAD_ARGS)
        .args(["-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["success"], true);
    assert_eq!(json["sheets_status"], "failed");
    assert!(json["sheets_error"].as_str().unwrap().starts_with("webhook:"));
}

#[cfg(unix)]
#[test]
fn test_webhook_body_sent_on_stdin() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = setup_test_project();
    let bin = tmp.path().join("bin");
    std::fs::create_dir(&bin).unwrap();
    let record = tmp.path().join("record");
    std::fs::create_dir(&record).unwrap();

    // Stand-in curl: remember argv and stdin, answer 200
    let script = format!(
        "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{dir}/argv'\ncat > '{dir}/stdin'\nprintf 'ok\\n200'\n",
        dir = record.display()
    );
    let curl = bin.join("curl");
    std::fs::write(&curl, script).unwrap();
    std::fs::set_permissions(&curl, std::fs::Permissions::from_mode(0o755)).unwrap();

    let path = format!("{}:{}", bin.display(), std::env::var("PATH").unwrap_or_default());
    let output = roi_in(tmp.path())
        .env("PATH", path)
        .env("ROI_WEBHOOK_URL", "https://hooks.example/exec")
        .arg("submit")
        .args(LEAD_ARGS)
        .args(["-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["sheets_status"], "success");

    let argv = std::fs::read_to_string(record.join("argv")).unwrap();
    assert!(argv.lines().any(|l| l == "@-"));
    assert!(argv.lines().any(|l| l == "https://hooks.example/exec"));
    assert!(!argv.contains("Asha Mehta"));

    let body: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(record.join("stdin")).unwrap()).unwrap();
    assert_eq!(body["lead"]["name"], "Asha Mehta");
    assert_eq!(body["total"], 3632000.0);
}

#[test]
fn test_submit_rejects_invalid_email() {
    let tmp = setup_project_with_ledger();
    roi_in(tmp.path())
        .args([
            "submit",
            "--name",
            "Asha",
            "--position",
            "Head",
            "--company",
            "Acme",
            "--phone",
            "12345",
            "--email",
            "not-an-email",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email address"));

    assert!(!tmp.path().join("leads.csv").exists());
}

#[test]
fn test_submit_rejects_missing_fields() {
    let tmp = setup_test_project();
    roi_in(tmp.path())
        .args(["submit", "--name", "Asha"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

// ============================================================================
// Raw body
// ============================================================================

#[test]
fn test_body_submission_success() {
    let tmp = setup_project_with_ledger();
    let body = tmp.path().join("body.json");
    std::fs::write(&body, VALID_BODY).unwrap();

    let output = roi_in(tmp.path())
        .args(["submit", "--body"])
        .arg(&body)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Form submitted successfully");
    assert_eq!(json["sheets_status"], "success");

    let ledger = std::fs::read_to_string(tmp.path().join("leads.csv")).unwrap();
    let row = ledger.lines().nth(1).unwrap();
    assert!(row.contains("Shah Polymers"));
    assert!(row.contains("\"Lab Raffia Tape Line, Lab Extruder\""));
    assert!(row.contains(",NO,"));
}

#[test]
fn test_body_from_stdin() {
    let tmp = setup_test_project();
    roi_in(tmp.path())
        .args(["submit", "--body", "-"])
        .write_stdin(VALID_BODY)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"not_configured\""));
}

#[test]
fn test_body_missing_email_is_rejected() {
    let tmp = setup_project_with_ledger();
    let output = roi_in(tmp.path())
        .args(["submit", "--body", "-"])
        .write_stdin(r#"{"lead": {"name": "Ravi", "company": "Shah", "phone": "1"}}"#)
        .output()
        .unwrap();
    assert!(!output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Missing required fields");
    assert_eq!(json["details"], serde_json::json!(["email"]));
    assert!(!tmp.path().join("leads.csv").exists());
}

#[test]
fn test_body_schema_violation_is_rejected() {
    let tmp = setup_test_project();
    let output = roi_in(tmp.path())
        .args(["submit", "--body", "-"])
        .write_stdin(r#"{"lead": {"name": 5}, "results": [{"id": 9}]}"#)
        .output()
        .unwrap();
    assert!(!output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["message"], "Invalid submission body");
    assert!(!json["details"].as_array().unwrap().is_empty());
}

#[test]
fn test_body_malformed_json_is_rejected() {
    let tmp = setup_test_project();
    roi_in(tmp.path())
        .args(["submit", "--body", "-"])
        .write_stdin("{not json")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid submission body"));
}
