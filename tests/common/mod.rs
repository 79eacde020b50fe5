//! Shared test helpers for integration tests

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// Helper to get a roi command isolated from the user's config and webhook
pub fn roi_in(dir: &Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("roi"));
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("ROI_WEBHOOK_URL")
        .env_remove("GOOGLE_APPS_SCRIPT_URL")
        .env_remove("ROI_LOG");
    cmd
}

/// Helper to create a test project in a temp directory
pub fn setup_test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    roi_in(tmp.path()).arg("init").assert().success();
    tmp
}

/// Helper to create a project whose submissions go to `leads.csv`
pub fn setup_project_with_ledger() -> TempDir {
    let tmp = setup_test_project();
    let config = tmp.path().join(".roi/config.yaml");
    let mut content = std::fs::read_to_string(&config).unwrap();
    content.push_str("\nledger: leads.csv\n");
    std::fs::write(&config, content).unwrap();
    tmp
}

/// Lead form flags that pass validation
pub const LEAD_ARGS: [&str; 10] = [
    "--name",
    "Asha Mehta",
    "--position",
    "Plant Head",
    "--company",
    "Acme Plastics",
    "--phone",
    "+91 98765 43210",
    "--email",
    "asha@acme.example",
];

/// Parse a command's stdout as JSON
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}
