//! Elapsed-time classification for the investigation timer
//!
//! Banding drives the timer color and the within-target flag. The 1 Hz tick
//! source itself lives with the TUI; this module is pure.

use serde::{Deserialize, Serialize};

/// Last second that still counts as comfortably on pace
pub const WARNING_THRESHOLD_SECS: u64 = 240;

/// The 5-minute investigation target
pub const TARGET_SECS: u64 = 300;

/// Color band for the elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    /// 0-4 minutes
    Active,
    /// 4-5 minutes
    Warning,
    /// past 5 minutes
    Expired,
}

/// Classify elapsed seconds into the three-band status
pub fn classify(elapsed_seconds: u64) -> TimerStatus {
    if elapsed_seconds <= WARNING_THRESHOLD_SECS {
        TimerStatus::Active
    } else if elapsed_seconds <= TARGET_SECS {
        TimerStatus::Warning
    } else {
        TimerStatus::Expired
    }
}

/// Whether the investigation is still within the 5-minute target
pub fn within_target(elapsed_seconds: u64) -> bool {
    elapsed_seconds <= TARGET_SECS
}

/// m:ss readout
pub fn format_mmss(elapsed_seconds: u64) -> String {
    format!("{}:{:02}", elapsed_seconds / 60, elapsed_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_bands() {
        for secs in 0..=240 {
            assert_eq!(classify(secs), TimerStatus::Active, "at {secs}s");
        }
        for secs in 241..=300 {
            assert_eq!(classify(secs), TimerStatus::Warning, "at {secs}s");
        }
        for secs in 301..=600 {
            assert_eq!(classify(secs), TimerStatus::Expired, "at {secs}s");
        }
    }

    #[test]
    fn test_within_target_boundary() {
        assert!(within_target(0));
        assert!(within_target(300));
        assert!(!within_target(301));
    }

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(0), "0:00");
        assert_eq!(format_mmss(59), "0:59");
        assert_eq!(format_mmss(60), "1:00");
        assert_eq!(format_mmss(305), "5:05");
    }
}
