//! CLI integration tests for shrinkctl
//!
//! Tests the non-interactive surface:
//! - shrinkctl patterns      pattern catalog listing
//! - shrinkctl score FILE    risk breakdown for an exported investigation

use shrink_common::export;
use shrink_common::patterns::PatternTag;
use shrink_common::record::{BasicInfo, InvestigationRecord, RootCause, RootCauseCategory};
use std::process::Command;

fn shrinkctl() -> Command {
    Command::new(env!("CARGO_BIN_EXE_shrinkctl"))
}

#[test]
fn test_patterns_lists_full_catalog() {
    let output = shrinkctl()
        .arg("patterns")
        .output()
        .expect("Failed to run shrinkctl");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("recurring-employee"));
    assert!(stdout.contains("Recurring Employee Issues"));
    assert!(stdout.contains("training-gap"));
    assert!(stdout.contains("Training Gaps"));
}

#[test]
fn test_score_reports_breakdown_and_level() {
    let dir = tempfile::tempdir().unwrap();

    let mut record = InvestigationRecord::default();
    record.basic_info = BasicInfo {
        store_number: "1234".to_string(),
        amount: 1200.0,
        ..BasicInfo::default()
    };
    record.patterns.insert(PatternTag::RecurringEmployee);
    record.root_cause = RootCause {
        category: Some(RootCauseCategory::FraudulentActivity),
        employee_involved: true,
        ..RootCause::default()
    };

    let path = export::write_export(&record, 280, dir.path()).unwrap();

    let output = shrinkctl()
        .arg("score")
        .arg(&path)
        .output()
        .expect("Failed to run shrinkctl");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Risk score:"));
    assert!(stdout.contains("9/10"));
    assert!(stdout.contains("HIGH"));
    assert!(stdout.contains("management escalation"));
}

#[test]
fn test_score_fails_cleanly_on_missing_file() {
    let output = shrinkctl()
        .arg("score")
        .arg("/nonexistent/investigation.json")
        .output()
        .expect("Failed to run shrinkctl");
    assert!(!output.status.success());
}

#[test]
fn test_help_mentions_subcommands() {
    let output = shrinkctl()
        .arg("--help")
        .output()
        .expect("Failed to run shrinkctl");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("investigate"));
    assert!(stdout.contains("patterns"));
    assert!(stdout.contains("score"));
}
