//! Investigation record - the aggregate every wizard step edits
//!
//! Updates are immutable-per-update: `RecordUpdate::merged` produces a new
//! record value. Top-level keys merge shallowly; a nested section present in
//! the update replaces the stored one wholesale, so callers supply the
//! complete section they want.

use crate::patterns::{self, PatternTag};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// Department where the incident occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Department {
    Electronics,
    Grocery,
    Pharmacy,
    Automotive,
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
    Clothing,
    Toys,
    Sports,
    Beauty,
    Jewelry,
    #[serde(rename = "Photo Center")]
    PhotoCenter,
}

impl Department {
    pub const ALL: &'static [Department] = &[
        Self::Electronics,
        Self::Grocery,
        Self::Pharmacy,
        Self::Automotive,
        Self::HomeAndGarden,
        Self::Clothing,
        Self::Toys,
        Self::Sports,
        Self::Beauty,
        Self::Jewelry,
        Self::PhotoCenter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Grocery => "Grocery",
            Self::Pharmacy => "Pharmacy",
            Self::Automotive => "Automotive",
            Self::HomeAndGarden => "Home & Garden",
            Self::Clothing => "Clothing",
            Self::Toys => "Toys",
            Self::Sports => "Sports",
            Self::Beauty => "Beauty",
            Self::Jewelry => "Jewelry",
            Self::PhotoCenter => "Photo Center",
        }
    }
}

/// Kind of discrepancy under investigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueType {
    #[serde(rename = "Cash Short")]
    CashShort,
    #[serde(rename = "Cash Over")]
    CashOver,
    #[serde(rename = "Inventory Discrepancy")]
    InventoryDiscrepancy,
    #[serde(rename = "Transaction Error")]
    TransactionError,
    #[serde(rename = "System Malfunction")]
    SystemMalfunction,
    #[serde(rename = "Procedure Violation")]
    ProcedureViolation,
    #[serde(rename = "Customer Complaint")]
    CustomerComplaint,
}

impl IssueType {
    pub const ALL: &'static [IssueType] = &[
        Self::CashShort,
        Self::CashOver,
        Self::InventoryDiscrepancy,
        Self::TransactionError,
        Self::SystemMalfunction,
        Self::ProcedureViolation,
        Self::CustomerComplaint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CashShort => "Cash Short",
            Self::CashOver => "Cash Over",
            Self::InventoryDiscrepancy => "Inventory Discrepancy",
            Self::TransactionError => "Transaction Error",
            Self::SystemMalfunction => "System Malfunction",
            Self::ProcedureViolation => "Procedure Violation",
            Self::CustomerComplaint => "Customer Complaint",
        }
    }
}

/// Primary root-cause category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RootCauseCategory {
    #[serde(rename = "Human Error")]
    HumanError,
    #[serde(rename = "System Malfunction")]
    SystemMalfunction,
    #[serde(rename = "Process Failure")]
    ProcessFailure,
    #[serde(rename = "Training Deficiency")]
    TrainingDeficiency,
    #[serde(rename = "Equipment Failure")]
    EquipmentFailure,
    #[serde(rename = "Policy Violation")]
    PolicyViolation,
    #[serde(rename = "External Factor")]
    ExternalFactor,
    #[serde(rename = "Fraudulent Activity")]
    FraudulentActivity,
}

impl RootCauseCategory {
    pub const ALL: &'static [RootCauseCategory] = &[
        Self::HumanError,
        Self::SystemMalfunction,
        Self::ProcessFailure,
        Self::TrainingDeficiency,
        Self::EquipmentFailure,
        Self::PolicyViolation,
        Self::ExternalFactor,
        Self::FraudulentActivity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HumanError => "Human Error",
            Self::SystemMalfunction => "System Malfunction",
            Self::ProcessFailure => "Process Failure",
            Self::TrainingDeficiency => "Training Deficiency",
            Self::EquipmentFailure => "Equipment Failure",
            Self::PolicyViolation => "Policy Violation",
            Self::ExternalFactor => "External Factor",
            Self::FraudulentActivity => "Fraudulent Activity",
        }
    }
}

/// Immediate action selected on the resolution step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImmediateAction {
    #[serde(rename = "No Action Required")]
    NoActionRequired,
    #[serde(rename = "Retraining Required")]
    RetrainingRequired,
    #[serde(rename = "Policy Review")]
    PolicyReview,
    #[serde(rename = "System Repair/Maintenance")]
    SystemRepair,
    #[serde(rename = "Disciplinary Action")]
    DisciplinaryAction,
    #[serde(rename = "Process Modification")]
    ProcessModification,
    #[serde(rename = "Additional Supervision")]
    AdditionalSupervision,
    #[serde(rename = "Investigation Escalation")]
    InvestigationEscalation,
}

impl ImmediateAction {
    pub const ALL: &'static [ImmediateAction] = &[
        Self::NoActionRequired,
        Self::RetrainingRequired,
        Self::PolicyReview,
        Self::SystemRepair,
        Self::DisciplinaryAction,
        Self::ProcessModification,
        Self::AdditionalSupervision,
        Self::InvestigationEscalation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoActionRequired => "No Action Required",
            Self::RetrainingRequired => "Retraining Required",
            Self::PolicyReview => "Policy Review",
            Self::SystemRepair => "System Repair/Maintenance",
            Self::DisciplinaryAction => "Disciplinary Action",
            Self::ProcessModification => "Process Modification",
            Self::AdditionalSupervision => "Additional Supervision",
            Self::InvestigationEscalation => "Investigation Escalation",
        }
    }
}

/// Coarse incident severity. User-overridable; always one of the three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl Default for RiskLevel {
    fn default() -> Self {
        Self::Low
    }
}

impl RiskLevel {
    pub const ALL: &'static [RiskLevel] = &[Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Step 1: essential incident details
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    #[serde(default)]
    pub store_number: String,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub department: Option<Department>,
    #[serde(default, deserialize_with = "non_negative_amount")]
    pub amount: f64,
    #[serde(rename = "type", default, deserialize_with = "lenient_enum")]
    pub issue_type: Option<IssueType>,
    #[serde(default)]
    pub register_number: String,
    #[serde(default)]
    pub employee_id: String,
}

/// Step 3: root-cause analysis
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootCause {
    #[serde(default, deserialize_with = "lenient_enum")]
    pub category: Option<RootCauseCategory>,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub employee_involved: bool,
    #[serde(default)]
    pub register_issue: bool,
}

/// Step 4: resolution and follow-up
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    #[serde(default, deserialize_with = "lenient_enum")]
    pub immediate_action: Option<ImmediateAction>,
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub follow_up_required: bool,
    /// Only meaningful while follow_up_required is set; a stale value is kept
    /// when the flag is cleared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

/// The single aggregate collected across the four wizard steps
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestigationRecord {
    #[serde(default)]
    pub basic_info: BasicInfo,
    #[serde(default, deserialize_with = "patterns::lenient_tag_set")]
    pub patterns: BTreeSet<PatternTag>,
    #[serde(default)]
    pub root_cause: RootCause,
    #[serde(default)]
    pub resolution: Resolution,
}

/// Partial update: present sections replace the stored ones wholesale
#[derive(Debug, Clone, Default)]
pub struct RecordUpdate {
    pub basic_info: Option<BasicInfo>,
    pub patterns: Option<BTreeSet<PatternTag>>,
    pub root_cause: Option<RootCause>,
    pub resolution: Option<Resolution>,
}

impl InvestigationRecord {
    /// Shallow merge: sections present in the update win, absent sections
    /// keep their stored value. Returns a new record.
    pub fn merged(&self, update: RecordUpdate) -> Self {
        Self {
            basic_info: update.basic_info.unwrap_or_else(|| self.basic_info.clone()),
            patterns: update.patterns.unwrap_or_else(|| self.patterns.clone()),
            root_cause: update.root_cause.unwrap_or_else(|| self.root_cause.clone()),
            resolution: update.resolution.unwrap_or_else(|| self.resolution.clone()),
        }
    }
}

/// Parse a user-entered amount, coercing anything non-numeric or negative to 0
pub fn coerce_amount(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value.max(0.0),
        _ => 0.0,
    }
}

/// Decode an enum-valued field, treating unrecognized values as unset
fn lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(T::deserialize(value).ok())
}

/// Decode an amount from anything, clamping to the non-negative invariant
fn non_negative_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_f64()
        .filter(|v| v.is_finite())
        .map(|v| v.max(0.0))
        .unwrap_or(0.0))
}
