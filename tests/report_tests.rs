//! Report generation from the CLI

mod common;

use common::{roi_in, setup_test_project, LEAD_ARGS};
use predicates::prelude::*;
use std::path::{Path, PathBuf};

/// The single file written into `dir`
fn only_file(dir: &Path) -> PathBuf {
    let entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1, "expected one file in {}", dir.display());
    entries.into_iter().next().unwrap()
}

#[test]
fn test_report_requires_lead() {
    let tmp = setup_test_project();
    roi_in(tmp.path())
        .arg("report")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No lead captured yet"));
}

#[test]
fn test_markdown_report_after_submit() {
    let tmp = setup_test_project();
    roi_in(tmp.path()).arg("submit").args(LEAD_ARGS).assert().success();
    roi_in(tmp.path())
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let path = only_file(&tmp.path().join("reports"));
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("Neptune_ROI_Report_Acme_Plastics_"));
    assert!(name.ends_with(".md"));

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("Lab ROI Analysis Report for Acme Plastics"));
    assert!(content.contains("Color Rejection After Stretching"));
    assert!(content.contains("Financial Summary"));
    assert!(content.contains("₹36,32,000"));
}

#[test]
fn test_report_lists_only_selected_pains() {
    let tmp = setup_test_project();
    roi_in(tmp.path()).args(["deselect", "2"]).assert().success();
    roi_in(tmp.path())
        .arg("report")
        .args(LEAD_ARGS)
        .assert()
        .success();

    let content = std::fs::read_to_string(only_file(&tmp.path().join("reports"))).unwrap();
    assert!(!content.contains("Missed R&D Opportunities"));
    assert!(content.contains("Peak Season Nightmare"));
    assert!(content.contains("₹23,12,000"));
}

#[test]
fn test_html_report_to_custom_dir() {
    let tmp = setup_test_project();
    roi_in(tmp.path())
        .args(["report", "--html", "--out", "out"])
        .args(LEAD_ARGS)
        .assert()
        .success();

    let path = only_file(&tmp.path().join("out"));
    assert_eq!(path.extension().unwrap(), "html");
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("<!DOCTYPE html>"));
    assert!(content.contains("Acme Plastics"));
    assert!(content.contains("Pain Points &amp; Impact Analysis"));
}

#[test]
fn test_md_and_html_conflict() {
    let tmp = setup_test_project();
    roi_in(tmp.path())
        .args(["report", "--md", "--html"])
        .args(LEAD_ARGS)
        .assert()
        .failure();
}

#[test]
fn test_report_rejects_incomplete_lead_flags() {
    let tmp = setup_test_project();
    roi_in(tmp.path())
        .args(["report", "--name", "Asha"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Lead form is incomplete"));

    assert!(!tmp.path().join("reports").exists());
}
