//! Settlement result models.
//!
//! This module contains the [`SettlementResult`] type returned when a whole
//! trip is settled, together with the audit trace recording how the plan
//! was reached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DirectedBalance, NetBalance, SettlementPlan};

/// One stage of the settlement pipeline as recorded in the audit trace.
///
/// `rule_id` is one of `ledger_aggregation`, `netting` or `greedy_matching`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// Position of the stage in the pipeline, starting at 1.
    pub step_number: u32,
    /// Stable identifier of the stage.
    pub rule_id: String,
    /// Display name of the stage.
    pub rule_name: String,
    /// Counts and settings the stage started from.
    pub input: serde_json::Value,
    /// Counts and totals the stage produced.
    pub output: serde_json::Value,
    /// One-line summary for people reading the trace.
    pub reasoning: String,
}

/// Severity attached to an [`AuditWarning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    /// Informational; the plan is still correct.
    Low,
    /// The plan is correct but the inputs look suspicious.
    Medium,
    /// The plan may not clear every balance.
    High,
}

/// A warning generated while settling a trip.
///
/// Warnings indicate potential issues that don't prevent a plan from being
/// produced but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// Warning code, e.g. `OVERPAYMENT`.
    pub code: String,
    /// What happened, naming the participants or currencies involved.
    pub message: String,
    /// The severity level.
    pub severity: WarningSeverity,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(code: &str, message: impl Into<String>, severity: WarningSeverity) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            severity,
        }
    }
}

/// Pipeline stages and warnings for one settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// Stages in the order they ran.
    pub steps: Vec<AuditStep>,
    /// Warnings raised along the way.
    pub warnings: Vec<AuditWarning>,
    /// Wall-clock time spent settling, in microseconds.
    pub duration_us: u64,
}

/// The complete result of settling a trip.
///
/// # Example
///
/// ```
/// use trip_settlement::models::{AuditTrace, SettlementPlan, SettlementResult};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let result = SettlementResult {
///     calculation_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "0.1.0".to_string(),
///     trip_id: "trip_001".to_string(),
///     currency: "USD".to_string(),
///     directed_balances: vec![],
///     net_balances: vec![],
///     plan: SettlementPlan::empty("USD"),
///     audit_trace: AuditTrace {
///         steps: vec![],
///         warnings: vec![],
///         duration_us: 0,
///     },
/// };
/// assert!(result.is_settled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResult {
    /// Identifier of this settlement run.
    pub calculation_id: Uuid,
    /// When the plan was computed.
    pub timestamp: DateTime<Utc>,
    /// Crate version that produced the plan.
    pub engine_version: String,
    /// The trip that was settled.
    pub trip_id: String,
    /// The currency every amount is expressed in.
    pub currency: String,
    /// Pairwise obligations after applying recorded settlements.
    pub directed_balances: Vec<DirectedBalance>,
    /// Each participant's net position.
    pub net_balances: Vec<NetBalance>,
    /// The recommended payments.
    pub plan: SettlementPlan,
    /// How the plan was reached.
    pub audit_trace: AuditTrace,
}

impl SettlementResult {
    /// Returns true if nobody owes anybody anything.
    pub fn is_settled(&self) -> bool {
        self.plan.is_empty()
    }

    /// Returns true if any warning was recorded with the given code.
    pub fn has_warning(&self, code: &str) -> bool {
        self.audit_trace.warnings.iter().any(|w| w.code == code)
    }
}
