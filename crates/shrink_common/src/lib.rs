//! Shrink Common - shared investigation types for Shrink Control
//!
//! Domain core for the timed loss-prevention investigation workflow: the
//! record aggregate, the pattern catalog, deterministic risk scoring, wizard
//! session state, timer classification, and the JSON export schema. No
//! terminal dependencies live here.

pub mod config;
pub mod export;
pub mod patterns;
pub mod recommend;
pub mod record;
pub mod risk;
pub mod session;
pub mod timer;

pub use config::ShrinkConfig;
pub use export::{ExportDocument, ExportError, StepTime};
pub use patterns::{PatternInfo, PatternTag, COMMON_PATTERNS};
pub use record::{
    BasicInfo, Department, ImmediateAction, InvestigationRecord, IssueType, RecordUpdate,
    Resolution, RiskLevel, RootCause, RootCauseCategory,
};
pub use session::{StepInfo, StepStatus, Timeliness, WizardSession, STEPS, STEP_COUNT};
pub use timer::TimerStatus;
