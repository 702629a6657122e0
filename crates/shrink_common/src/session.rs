//! Wizard session - step index, elapsed time, and derived statuses
//!
//! Four ordered steps, one active at a time. Targets are cumulative from the
//! start of the investigation, not per-step budgets.

use serde::{Deserialize, Serialize};

/// Number of wizard steps
pub const STEP_COUNT: usize = 4;

/// Cumulative time target per step, in seconds
pub const STEP_TIME_TARGETS: [u64; STEP_COUNT] = [30, 90, 210, 300];

/// Grace window after a target before a step counts as overdue
pub const OVERDUE_GRACE_SECS: u64 = 60;

/// Static step metadata shown in the progress header and step body
#[derive(Debug, Clone, Copy)]
pub struct StepInfo {
    pub title: &'static str,
    pub target_label: &'static str,
    pub description: &'static str,
}

pub const STEPS: [StepInfo; STEP_COUNT] = [
    StepInfo {
        title: "Basic Information",
        target_label: "30s",
        description: "Enter the essential details about the incident. Target completion: 30 seconds.",
    },
    StepInfo {
        title: "Pattern Recognition",
        target_label: "1m",
        description: "Identify any patterns that may be related to this incident. Target completion: 1 minute.",
    },
    StepInfo {
        title: "Root Cause Analysis",
        target_label: "2m",
        description: "Identify the underlying cause of the incident. Target completion: 2 minutes.",
    },
    StepInfo {
        title: "Resolution & Action",
        target_label: "1.5m",
        description: "Define immediate actions and follow-up requirements. Target completion: 1.5 minutes.",
    },
];

/// Position of a step relative to the active one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Active,
    Pending,
}

/// Whether elapsed time is within, near, or past a step's target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Timeliness {
    OnTime,
    Warning,
    Overdue,
}

impl Timeliness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTime => "on-time",
            Self::Warning => "warning",
            Self::Overdue => "overdue",
        }
    }
}

/// Classify elapsed seconds against a step's cumulative target
pub fn timeliness(elapsed_seconds: u64, step: usize) -> Timeliness {
    let target = STEP_TIME_TARGETS[step];
    if elapsed_seconds <= target {
        Timeliness::OnTime
    } else if elapsed_seconds <= target + OVERDUE_GRACE_SECS {
        Timeliness::Warning
    } else {
        Timeliness::Overdue
    }
}

/// One wizard session per process. No reset; a fresh run starts a fresh one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSession {
    /// Active step, in [0, STEP_COUNT)
    pub current_step: usize,
    /// Whole seconds since the investigation started; frozen while stopped
    pub elapsed_seconds: u64,
    pub timer_active: bool,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self {
            current_step: 0,
            elapsed_seconds: 0,
            timer_active: false,
        }
    }
}

impl WizardSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one step; no-op on the last step
    pub fn next(&mut self) {
        if self.current_step < STEP_COUNT - 1 {
            self.current_step += 1;
        }
    }

    /// Go back one step; no-op on the first step
    pub fn previous(&mut self) {
        if self.current_step > 0 {
            self.current_step -= 1;
        }
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == STEP_COUNT - 1
    }

    /// Begin (or resume) counting
    pub fn start(&mut self) {
        self.timer_active = true;
    }

    /// Freeze the elapsed count; the value is retained
    pub fn stop(&mut self) {
        self.timer_active = false;
    }

    /// Apply one 1-second tick. Ticks delivered while stopped are discarded,
    /// so elapsed time is exactly where stop() left it.
    pub fn tick(&mut self) {
        if self.timer_active {
            self.elapsed_seconds += 1;
        }
    }

    pub fn step_status(&self, step: usize) -> StepStatus {
        if step < self.current_step {
            StepStatus::Completed
        } else if step == self.current_step {
            StepStatus::Active
        } else {
            StepStatus::Pending
        }
    }

    pub fn timeliness(&self, step: usize) -> Timeliness {
        timeliness(self.elapsed_seconds, step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_previous_round_trip() {
        for start in 1..STEP_COUNT - 1 {
            let mut session = WizardSession::new();
            session.current_step = start;
            session.next();
            session.previous();
            assert_eq!(session.current_step, start);
        }
    }

    #[test]
    fn test_boundaries_are_no_ops() {
        let mut session = WizardSession::new();
        session.previous();
        assert_eq!(session.current_step, 0);

        session.current_step = STEP_COUNT - 1;
        session.next();
        assert_eq!(session.current_step, STEP_COUNT - 1);
    }

    #[test]
    fn test_step_status() {
        let mut session = WizardSession::new();
        session.current_step = 2;
        assert_eq!(session.step_status(0), StepStatus::Completed);
        assert_eq!(session.step_status(1), StepStatus::Completed);
        assert_eq!(session.step_status(2), StepStatus::Active);
        assert_eq!(session.step_status(3), StepStatus::Pending);
    }

    #[test]
    fn test_timeliness_bands() {
        assert_eq!(timeliness(0, 0), Timeliness::OnTime);
        assert_eq!(timeliness(30, 0), Timeliness::OnTime);
        assert_eq!(timeliness(31, 0), Timeliness::Warning);
        assert_eq!(timeliness(90, 0), Timeliness::Warning);
        assert_eq!(timeliness(91, 0), Timeliness::Overdue);

        assert_eq!(timeliness(300, 3), Timeliness::OnTime);
        assert_eq!(timeliness(301, 3), Timeliness::Warning);
        assert_eq!(timeliness(360, 3), Timeliness::Warning);
        assert_eq!(timeliness(361, 3), Timeliness::Overdue);
    }

    #[test]
    fn test_ticks_ignored_while_stopped() {
        let mut session = WizardSession::new();
        session.start();
        for _ in 0..42 {
            session.tick();
        }
        assert_eq!(session.elapsed_seconds, 42);

        session.stop();
        for _ in 0..10 {
            session.tick();
        }
        assert_eq!(session.elapsed_seconds, 42);

        // restart keeps counting from where it stopped
        session.start();
        session.tick();
        assert_eq!(session.elapsed_seconds, 43);
    }
}
