//! Deterministic risk scoring for investigations
//!
//! Pure functions over the record; no LLM, no I/O. The score is a bounded
//! weighted sum, the level a threshold classification. The level is a
//! suggestion: it never overwrites a risk level the investigator picked.

use crate::patterns::PatternTag;
use crate::record::{InvestigationRecord, RiskLevel, RootCauseCategory};

/// Scores are clamped here
pub const MAX_SCORE: u8 = 10;

/// Score at or above which the suggested level is High
pub const HIGH_THRESHOLD: u8 = 6;

/// Score at or above which the suggested level is Medium
pub const MEDIUM_THRESHOLD: u8 = 3;

/// Per-factor contributions, for display next to the total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskBreakdown {
    pub amount: u8,
    pub patterns: u8,
    pub root_cause: u8,
    pub total: u8,
}

/// Compute the per-factor breakdown for a record
pub fn score_breakdown(record: &InvestigationRecord) -> RiskBreakdown {
    // Amount tiers are mutually exclusive: exactly one applies.
    let amount_value = record.basic_info.amount;
    let amount = if amount_value > 1000.0 {
        3
    } else if amount_value > 500.0 {
        2
    } else if amount_value > 100.0 {
        1
    } else {
        0
    };

    let mut patterns = 0;
    if record.patterns.contains(&PatternTag::RecurringEmployee) {
        patterns += 2;
    }
    if record.patterns.contains(&PatternTag::AmountPattern) {
        patterns += 2;
    }
    // Breadth bonus, independent of which tags are set
    if record.patterns.len() > 2 {
        patterns += 1;
    }

    let mut root_cause = 0;
    if record.root_cause.category == Some(RootCauseCategory::FraudulentActivity) {
        root_cause += 3;
    }
    if record.root_cause.employee_involved {
        root_cause += 1;
    }

    let total = (amount + patterns + root_cause).min(MAX_SCORE);
    RiskBreakdown {
        amount,
        patterns,
        root_cause,
        total,
    }
}

/// Total risk score in [0, MAX_SCORE]
pub fn risk_score(record: &InvestigationRecord) -> u8 {
    score_breakdown(record).total
}

/// Suggested qualitative level for a record
pub fn suggested_level(record: &InvestigationRecord) -> RiskLevel {
    level_for_score(risk_score(record))
}

/// Threshold classification of a score
pub fn level_for_score(score: u8) -> RiskLevel {
    if score >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if score >= MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
