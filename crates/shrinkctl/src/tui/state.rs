//! Wizard TUI state - everything rendered on screen comes from this struct

use crate::logging::SessionLogEntry;
use shrink_common::export::{self, ExportError};
use shrink_common::record::{coerce_amount, InvestigationRecord, RecordUpdate};
use shrink_common::session::{WizardSession, STEP_COUNT};
use shrink_common::{risk, ShrinkConfig, COMMON_PATTERNS};
use std::path::PathBuf;

/// Which top-level screen is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Pre-investigation overview; the timer has not started yet
    Welcome,
    /// The four-step wizard
    Wizard,
}

/// Central TUI state
#[derive(Debug)]
pub struct WizardTuiState {
    pub screen: Screen,

    /// The record being assembled; replaced on every update
    pub record: InvestigationRecord,

    /// Step index, elapsed seconds, timer flag
    pub session: WizardSession,

    /// Focused form field on the current step
    pub field_index: usize,

    /// Raw text buffer behind the amount field; commits through coercion
    pub amount_input: String,

    /// Raw text buffer behind the follow-up date field (YYYY-MM-DD)
    pub date_input: String,

    /// Set once the investigator explicitly picks a risk level; from then on
    /// the suggestion stops seeding the field
    pub risk_overridden: bool,

    /// One-line status message (export results, hints)
    pub notice: Option<String>,

    /// Whether the help overlay is shown
    pub show_help: bool,

    /// Where exports are written
    pub export_dir: PathBuf,

    /// Last successful export, for the status bar
    pub last_export: Option<PathBuf>,

    /// Correlates session log entries for this run
    pub session_id: String,
}

impl WizardTuiState {
    pub fn new(config: &ShrinkConfig) -> Self {
        let mut record = InvestigationRecord::default();
        if let Some(store) = &config.store_number {
            record.basic_info.store_number = store.clone();
        }

        Self {
            screen: Screen::Welcome,
            record,
            session: WizardSession::new(),
            field_index: 0,
            amount_input: String::new(),
            date_input: String::new(),
            risk_overridden: false,
            notice: None,
            show_help: false,
            export_dir: config.export_dir(),
            last_export: None,
            session_id: SessionLogEntry::generate_session_id(),
        }
    }

    /// Number of focusable fields on the current step
    pub fn field_count(&self) -> usize {
        match self.session.current_step {
            0 => 6,
            1 => COMMON_PATTERNS.len(),
            2 => 4,
            3 => 5,
            _ => 0,
        }
    }

    pub fn focus_next(&mut self) {
        self.field_index = (self.field_index + 1) % self.field_count();
    }

    pub fn focus_previous(&mut self) {
        let count = self.field_count();
        self.field_index = (self.field_index + count - 1) % count;
    }

    /// Leave the welcome screen and start counting
    pub fn start_investigation(&mut self) {
        self.screen = Screen::Wizard;
        self.session.start();
        self.notice = None;
        self.log_event("investigation_started", None, true, None);
    }

    pub fn next_step(&mut self) {
        if self.session.is_last_step() {
            return;
        }
        self.session.next();
        self.on_step_entered();
    }

    pub fn previous_step(&mut self) {
        if self.session.current_step == 0 {
            return;
        }
        self.session.previous();
        self.on_step_entered();
    }

    /// Reset focus and input buffers for the step just entered
    fn on_step_entered(&mut self) {
        self.field_index = 0;
        self.sync_buffers();

        // The suggestion seeds the resolution until the investigator makes
        // an explicit choice; after that their pick sticks.
        if self.session.current_step == STEP_COUNT - 1 && !self.risk_overridden {
            let mut resolution = self.record.resolution.clone();
            resolution.risk_level = risk::suggested_level(&self.record);
            self.record = self.record.merged(RecordUpdate {
                resolution: Some(resolution),
                ..RecordUpdate::default()
            });
        }
    }

    /// Rebuild text buffers from the record
    fn sync_buffers(&mut self) {
        self.amount_input = if self.record.basic_info.amount == 0.0 {
            String::new()
        } else {
            format!("{}", self.record.basic_info.amount)
        };
        self.date_input = self
            .record
            .resolution
            .follow_up_date
            .map(|date| date.to_string())
            .unwrap_or_default();
    }

    /// Commit the amount buffer through coercion
    pub fn commit_amount(&mut self) {
        let mut info = self.record.basic_info.clone();
        info.amount = coerce_amount(&self.amount_input);
        self.record = self.record.merged(RecordUpdate {
            basic_info: Some(info),
            ..RecordUpdate::default()
        });
    }

    pub fn set_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    /// Write the export file; the record stays intact either way so the
    /// investigator can retry.
    pub fn export(&mut self) {
        match export::write_export(
            &self.record,
            self.session.elapsed_seconds,
            &self.export_dir,
        ) {
            Ok(path) => {
                self.set_notice(format!("Exported {}", path.display()));
                self.log_event(
                    "export_written",
                    Some(path.display().to_string()),
                    true,
                    None,
                );
                self.last_export = Some(path);
            }
            Err(err) => {
                let reason = match &err {
                    ExportError::Serialize(e) => e.to_string(),
                    ExportError::Write { source, .. } => source.to_string(),
                };
                self.set_notice(format!("Export failed: {reason} - press Ctrl+E to retry"));
                self.log_event("export_failed", None, false, Some(reason));
            }
        }
    }

    fn log_event(&self, event: &str, file: Option<String>, ok: bool, error: Option<String>) {
        let store = self.record.basic_info.store_number.trim();
        SessionLogEntry {
            ts: SessionLogEntry::now(),
            session_id: self.session_id.clone(),
            event: event.to_string(),
            store_number: (!store.is_empty()).then(|| store.to_string()),
            file,
            elapsed_seconds: self.session.elapsed_seconds,
            ok,
            error,
        }
        .write();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shrink_common::record::{RiskLevel, RootCause, RootCauseCategory};

    fn state() -> WizardTuiState {
        WizardTuiState::new(&ShrinkConfig::default())
    }

    #[test]
    fn test_store_prefill_from_config() {
        let config = ShrinkConfig {
            store_number: Some("0042".to_string()),
            ..ShrinkConfig::default()
        };
        let state = WizardTuiState::new(&config);
        assert_eq!(state.record.basic_info.store_number, "0042");
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        let mut state = state();
        assert_eq!(state.field_count(), 6);
        state.focus_previous();
        assert_eq!(state.field_index, 5);
        state.focus_next();
        assert_eq!(state.field_index, 0);
    }

    #[test]
    fn test_amount_commit_coerces_garbage() {
        let mut state = state();
        state.amount_input = "12x".to_string();
        state.commit_amount();
        assert_eq!(state.record.basic_info.amount, 0.0);

        state.amount_input = "245.99".to_string();
        state.commit_amount();
        assert_eq!(state.record.basic_info.amount, 245.99);
    }

    #[test]
    fn test_suggestion_seeds_resolution_until_overridden() {
        let mut state = state();
        state.start_investigation();
        // fraud + employee involvement scores 4 -> medium
        state.record = state.record.merged(RecordUpdate {
            root_cause: Some(RootCause {
                category: Some(RootCauseCategory::FraudulentActivity),
                employee_involved: true,
                ..RootCause::default()
            }),
            ..RecordUpdate::default()
        });

        state.next_step();
        state.next_step();
        state.next_step();
        assert!(state.session.is_last_step());
        assert_eq!(state.record.resolution.risk_level, RiskLevel::Medium);

        // the investigator overrides, then leaves and returns
        let mut resolution = state.record.resolution.clone();
        resolution.risk_level = RiskLevel::Low;
        state.record = state.record.merged(RecordUpdate {
            resolution: Some(resolution),
            ..RecordUpdate::default()
        });
        state.risk_overridden = true;

        state.previous_step();
        state.next_step();
        assert_eq!(state.record.resolution.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_step_navigation_clamps() {
        let mut state = state();
        state.previous_step();
        assert_eq!(state.session.current_step, 0);
        for _ in 0..6 {
            state.next_step();
        }
        assert_eq!(state.session.current_step, 3);
    }
}
