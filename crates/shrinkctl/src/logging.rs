//! Session event logging for shrinkctl
//!
//! JSONL audit trail of investigation lifecycle events, XDG-compliant with a
//! fallback chain.

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;

/// One investigation lifecycle event
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionLogEntry {
    /// ISO 8601 timestamp
    pub ts: String,

    /// Session ID (UUID), stable across one wizard run
    pub session_id: String,

    /// Event name: "investigation_started", "export_written", "export_failed"
    pub event: String,

    /// Store number at event time, if entered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_number: Option<String>,

    /// Exported file path, for export events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Elapsed investigation seconds at event time
    pub elapsed_seconds: u64,

    /// Success flag
    pub ok: bool,

    /// Error details if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SessionLogEntry {
    /// Discover log file path with fallback chain
    ///
    /// Priority:
    /// 1. $SHRINKCTL_LOG_FILE environment variable (explicit override)
    /// 2. $XDG_STATE_HOME/shrinkctl/ctl.jsonl (XDG standard)
    /// 3. ~/.local/state/shrinkctl/ctl.jsonl (XDG fallback)
    fn discover_log_path() -> Option<String> {
        if let Ok(path) = std::env::var("SHRINKCTL_LOG_FILE") {
            return Some(path);
        }

        if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
            return Some(format!("{}/shrinkctl/ctl.jsonl", xdg_state));
        }

        if let Ok(home) = std::env::var("HOME") {
            return Some(format!("{}/.local/state/shrinkctl/ctl.jsonl", home));
        }

        None
    }

    /// Write the entry to the log file. Failures are swallowed: a stdout
    /// fallback would corrupt the wizard's alternate screen, and the log is
    /// never worth interrupting an investigation for.
    pub fn write(&self) {
        let Ok(json) = serde_json::to_string(self) else {
            return;
        };
        let Some(path) = Self::discover_log_path() else {
            return;
        };
        let _ = Self::write_to_file(&json, &path);
    }

    /// Attempt to append the entry to the log file
    fn write_to_file(json: &str, path: &str) -> Result<(), std::io::Error> {
        if let Some(parent) = std::path::Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", json)?;
        Ok(())
    }

    /// Generate session ID
    pub fn generate_session_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Current timestamp in ISO 8601 format
    pub fn now() -> String {
        chrono::Utc::now().to_rfc3339()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serializes_without_empty_options() {
        let entry = SessionLogEntry {
            ts: SessionLogEntry::now(),
            session_id: SessionLogEntry::generate_session_id(),
            event: "investigation_started".to_string(),
            store_number: None,
            file: None,
            elapsed_seconds: 0,
            ok: true,
            error: None,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("investigation_started"));
        assert!(!json.contains("store_number"));
        assert!(!json.contains("error"));
    }

    #[test]
    fn test_entries_append_to_explicit_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ctl.jsonl");

        for event in ["investigation_started", "export_written"] {
            let entry = SessionLogEntry {
                ts: SessionLogEntry::now(),
                session_id: "s-1".to_string(),
                event: event.to_string(),
                store_number: Some("1234".to_string()),
                file: None,
                elapsed_seconds: 10,
                ok: true,
                error: None,
            };
            let json = serde_json::to_string(&entry).unwrap();
            SessionLogEntry::write_to_file(&json, path.to_str().unwrap()).unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
