//! Follow-up recommendations derived from the record
//!
//! Pure derivation shown on the resolution step and in score output.

use crate::patterns::PatternTag;
use crate::record::{InvestigationRecord, RiskLevel, RootCauseCategory};
use crate::risk;

/// Advice lines for a record, in display order. Empty when nothing applies.
pub fn recommendations(record: &InvestigationRecord) -> Vec<&'static str> {
    let mut advice = Vec::new();

    if risk::suggested_level(record) == RiskLevel::High {
        advice.push("High-risk incident - consider management escalation");
        advice.push("Schedule follow-up within 24-48 hours");
    }

    if record.patterns.contains(&PatternTag::RecurringEmployee) {
        advice.push("Employee pattern detected - review training records");
        advice.push("Consider additional supervision or coaching");
    }

    if record.root_cause.category == Some(RootCauseCategory::SystemMalfunction) {
        advice.push("System issue identified - alert IT/maintenance");
        advice.push("Check for similar issues at other registers");
    }

    advice
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{BasicInfo, RootCause};

    #[test]
    fn test_no_advice_for_quiet_record() {
        assert!(recommendations(&InvestigationRecord::default()).is_empty());
    }

    #[test]
    fn test_high_risk_triggers_escalation() {
        let mut record = InvestigationRecord {
            basic_info: BasicInfo {
                amount: 1500.0,
                ..BasicInfo::default()
            },
            ..InvestigationRecord::default()
        };
        record.root_cause = RootCause {
            category: Some(RootCauseCategory::FraudulentActivity),
            employee_involved: true,
            ..RootCause::default()
        };

        let advice = recommendations(&record);
        assert!(advice.iter().any(|line| line.contains("escalation")));
        assert!(advice.iter().any(|line| line.contains("24-48")));
    }

    #[test]
    fn test_recurring_employee_triggers_training_review() {
        let mut record = InvestigationRecord::default();
        record.patterns.insert(PatternTag::RecurringEmployee);
        let advice = recommendations(&record);
        assert!(advice.iter().any(|line| line.contains("training records")));
    }

    #[test]
    fn test_system_malfunction_triggers_it_alert() {
        let mut record = InvestigationRecord::default();
        record.root_cause.category = Some(RootCauseCategory::SystemMalfunction);
        let advice = recommendations(&record);
        assert!(advice.iter().any(|line| line.contains("IT/maintenance")));
    }
}
