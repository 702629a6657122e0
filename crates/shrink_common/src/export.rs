//! JSON export of a finished (or in-flight) investigation
//!
//! The document carries every record field plus export metadata. Everything
//! except the wizard-session internals survives a round trip.

use crate::record::InvestigationRecord;
use crate::session::{self, Timeliness, STEPS, STEP_COUNT, STEP_TIME_TARGETS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Per-step timeliness snapshot at export time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTime {
    pub step: String,
    pub target: u64,
    pub status: Timeliness,
}

/// The exported artifact: record fields at the top level, metadata beside them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    #[serde(flatten)]
    pub record: InvestigationRecord,
    pub case_id: String,
    /// ISO-8601 export timestamp
    pub timestamp: String,
    pub total_seconds: u64,
    pub step_times: Vec<StepTime>,
}

/// Export failures are recoverable: the record stays in memory and the
/// caller may retry.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize export document: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Assemble the export document for a record at the given elapsed time
pub fn build_export(
    record: &InvestigationRecord,
    elapsed_seconds: u64,
    exported_at: DateTime<Utc>,
) -> ExportDocument {
    let step_times = (0..STEP_COUNT)
        .map(|step| StepTime {
            step: STEPS[step].title.to_string(),
            target: STEP_TIME_TARGETS[step],
            status: session::timeliness(elapsed_seconds, step),
        })
        .collect();

    ExportDocument {
        record: record.clone(),
        case_id: uuid::Uuid::new_v4().to_string(),
        timestamp: exported_at.to_rfc3339(),
        total_seconds: elapsed_seconds,
        step_times,
    }
}

/// File name for an export: store number plus a UTC timestamp
pub fn export_file_name(store_number: &str, exported_at: DateTime<Utc>) -> String {
    let store: String = store_number
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let store = if store.is_empty() {
        "unknown".to_string()
    } else {
        store
    };
    format!(
        "investigation_{}_{}.json",
        store,
        exported_at.format("%Y%m%d%H%M%S")
    )
}

/// Serialize the document and write it under `dir`. Returns the file path.
pub fn write_export(
    record: &InvestigationRecord,
    elapsed_seconds: u64,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let exported_at = Utc::now();
    let document = build_export(record, elapsed_seconds, exported_at);
    let json = serde_json::to_string_pretty(&document)?;

    fs::create_dir_all(dir).map_err(|source| ExportError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(export_file_name(
        &record.basic_info.store_number,
        exported_at,
    ));
    fs::write(&path, json).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), elapsed_seconds, "export written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::PatternTag;
    use crate::record::{BasicInfo, Department, IssueType, RiskLevel};
    use chrono::TimeZone;

    fn sample_record() -> InvestigationRecord {
        let mut record = InvestigationRecord::default();
        record.basic_info = BasicInfo {
            store_number: "1234".to_string(),
            department: Some(Department::Electronics),
            amount: 750.50,
            issue_type: Some(IssueType::CashShort),
            register_number: "REG-01".to_string(),
            employee_id: "EMP12345".to_string(),
        };
        record.patterns.insert(PatternTag::RecurringEmployee);
        record.patterns.insert(PatternTag::AmountPattern);
        record.resolution.risk_level = RiskLevel::High;
        record.resolution.notes = "Escalated to market AP manager".to_string();
        record
    }

    #[test]
    fn test_document_round_trips_record() {
        let record = sample_record();
        let exported_at = Utc.with_ymd_and_hms(2026, 8, 6, 14, 30, 0).unwrap();
        let document = build_export(&record, 275, exported_at);

        let json = serde_json::to_string_pretty(&document).unwrap();
        let parsed: ExportDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.record, record);
        assert_eq!(parsed.total_seconds, 275);
        assert_eq!(parsed.case_id, document.case_id);
    }

    #[test]
    fn test_step_times_reflect_elapsed() {
        let record = sample_record();
        let exported_at = Utc.with_ymd_and_hms(2026, 8, 6, 14, 30, 0).unwrap();
        let document = build_export(&record, 120, exported_at);

        assert_eq!(document.step_times.len(), STEP_COUNT);
        assert_eq!(document.step_times[0].step, "Basic Information");
        // 120s: step 0 (target 30, +60 grace exhausted) overdue, step 1
        // (target 90) in its grace window, later steps still on time
        assert_eq!(document.step_times[0].status, Timeliness::Overdue);
        assert_eq!(document.step_times[1].status, Timeliness::Warning);
        assert_eq!(document.step_times[2].status, Timeliness::OnTime);
        assert_eq!(document.step_times[3].status, Timeliness::OnTime);
    }

    #[test]
    fn test_file_name_uses_store_and_timestamp() {
        let exported_at = Utc.with_ymd_and_hms(2026, 8, 6, 14, 30, 5).unwrap();
        assert_eq!(
            export_file_name("1234", exported_at),
            "investigation_1234_20260806143005.json"
        );
        assert_eq!(
            export_file_name("", exported_at),
            "investigation_unknown_20260806143005.json"
        );
        // path-hostile characters are flattened
        assert_eq!(
            export_file_name("12/34", exported_at),
            "investigation_12-34_20260806143005.json"
        );
    }

    #[test]
    fn test_write_export_round_trips_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let record = sample_record();

        let path = write_export(&record, 200, dir.path()).unwrap();
        assert!(path.exists());

        let contents = fs::read_to_string(&path).unwrap();
        let parsed: ExportDocument = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.record, record);
        assert_eq!(parsed.total_seconds, 200);
    }
}
