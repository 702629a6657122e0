//! Pattern catalog for the pattern recognition step
//!
//! Fixed vocabulary of recurring-issue tags. Selection is a set: toggling a
//! present tag removes it, toggling an absent tag adds it.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// A recognizable recurring-issue category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PatternTag {
    #[serde(rename = "recurring-employee")]
    RecurringEmployee,
    #[serde(rename = "time-pattern")]
    TimePattern,
    #[serde(rename = "register-specific")]
    RegisterSpecific,
    #[serde(rename = "amount-pattern")]
    AmountPattern,
    #[serde(rename = "department-trend")]
    DepartmentTrend,
    #[serde(rename = "transaction-type")]
    TransactionType,
    #[serde(rename = "system-related")]
    SystemRelated,
    #[serde(rename = "training-gap")]
    TrainingGap,
}

/// Catalog entry: tag plus the text shown to the investigator
#[derive(Debug, Clone, Copy)]
pub struct PatternInfo {
    pub tag: PatternTag,
    pub title: &'static str,
    pub description: &'static str,
}

/// The fixed catalog, in display order
pub const COMMON_PATTERNS: &[PatternInfo] = &[
    PatternInfo {
        tag: PatternTag::RecurringEmployee,
        title: "Recurring Employee Issues",
        description: "Same employee involved in multiple incidents",
    },
    PatternInfo {
        tag: PatternTag::TimePattern,
        title: "Time Pattern",
        description: "Issues occurring at specific times (shift changes, breaks)",
    },
    PatternInfo {
        tag: PatternTag::RegisterSpecific,
        title: "Register-Specific",
        description: "Problems isolated to particular registers",
    },
    PatternInfo {
        tag: PatternTag::AmountPattern,
        title: "Amount Patterns",
        description: "Consistent dollar amounts or percentage discrepancies",
    },
    PatternInfo {
        tag: PatternTag::DepartmentTrend,
        title: "Department Trends",
        description: "Higher frequency in specific departments",
    },
    PatternInfo {
        tag: PatternTag::TransactionType,
        title: "Transaction Type Issues",
        description: "Problems with specific transaction types (returns, voids)",
    },
    PatternInfo {
        tag: PatternTag::SystemRelated,
        title: "System-Related",
        description: "Technology or software-related patterns",
    },
    PatternInfo {
        tag: PatternTag::TrainingGap,
        title: "Training Gaps",
        description: "Issues indicating insufficient training",
    },
];

impl PatternTag {
    /// Stable identifier used in exported documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RecurringEmployee => "recurring-employee",
            Self::TimePattern => "time-pattern",
            Self::RegisterSpecific => "register-specific",
            Self::AmountPattern => "amount-pattern",
            Self::DepartmentTrend => "department-trend",
            Self::TransactionType => "transaction-type",
            Self::SystemRelated => "system-related",
            Self::TrainingGap => "training-gap",
        }
    }

    /// Catalog entry for this tag
    pub fn info(&self) -> &'static PatternInfo {
        COMMON_PATTERNS
            .iter()
            .find(|info| info.tag == *self)
            .expect("every tag has a catalog entry")
    }

    /// Parse a catalog identifier; unknown ids are None
    pub fn from_id(id: &str) -> Option<Self> {
        COMMON_PATTERNS
            .iter()
            .map(|info| info.tag)
            .find(|tag| tag.as_str() == id)
    }
}

/// Toggle a tag: remove if present, add if absent. Returns the new set.
pub fn toggle(set: &BTreeSet<PatternTag>, tag: PatternTag) -> BTreeSet<PatternTag> {
    let mut updated = set.clone();
    if !updated.remove(&tag) {
        updated.insert(tag);
    }
    updated
}

/// Deserialize a tag set, dropping unknown identifiers instead of failing
pub(crate) fn lenient_tag_set<'de, D>(deserializer: D) -> Result<BTreeSet<PatternTag>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .filter_map(|value| PatternTag::deserialize(value).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let empty = BTreeSet::new();
        let once = toggle(&empty, PatternTag::TimePattern);
        assert!(once.contains(&PatternTag::TimePattern));
        let twice = toggle(&once, PatternTag::TimePattern);
        assert!(twice.is_empty());
    }

    #[test]
    fn test_toggle_never_duplicates() {
        let mut set = BTreeSet::new();
        set.insert(PatternTag::AmountPattern);
        let toggled = toggle(&set, PatternTag::AmountPattern);
        assert!(!toggled.contains(&PatternTag::AmountPattern));
        assert_eq!(toggled.len(), 0);
    }

    #[test]
    fn test_every_tag_has_catalog_entry() {
        for info in COMMON_PATTERNS {
            assert_eq!(info.tag.info().title, info.title);
            assert_eq!(PatternTag::from_id(info.tag.as_str()), Some(info.tag));
        }
        assert_eq!(COMMON_PATTERNS.len(), 8);
    }

    #[test]
    fn test_unknown_ids_are_dropped_on_decode() {
        let json = r#"["recurring-employee", "not-a-real-pattern", "time-pattern"]"#;
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let set = lenient_tag_set(&mut deserializer).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&PatternTag::RecurringEmployee));
        assert!(set.contains(&PatternTag::TimePattern));
    }
}
