//! Balance simplification: netting followed by greedy matching.

use rust_decimal::Decimal;

use crate::models::{AuditStep, DirectedBalance, NetBalance, SettlementPlan};

use super::greedy_matching::match_debts;
use super::netting::compute_net_balances;

/// The result of simplifying a set of directed balances.
#[derive(Debug, Clone)]
pub struct SimplificationResult {
    /// Per-participant net positions computed in the netting phase.
    pub net_balances: Vec<NetBalance>,
    /// The recommended payments.
    pub plan: SettlementPlan,
    /// Audit steps for netting and matching, in order.
    pub audit_steps: Vec<AuditStep>,
}

/// Reduces directed balances to a settlement plan.
///
/// Runs [`compute_net_balances`] as step `step_number` and
/// [`match_debts`] as step `step_number + 1`.
///
/// # Examples
///
/// ```
/// use trip_settlement::calculation::{simplify, DEFAULT_TOLERANCE};
/// use trip_settlement::models::DirectedBalance;
/// use rust_decimal::Decimal;
///
/// // A owes B 30 and B owes C 30: A pays C directly.
/// let balances = vec![
///     DirectedBalance::new("a", "b", Decimal::new(3000, 2)),
///     DirectedBalance::new("b", "c", Decimal::new(3000, 2)),
/// ];
///
/// let result = simplify(&balances, "USD", DEFAULT_TOLERANCE, 1);
/// assert_eq!(result.plan.len(), 1);
/// assert_eq!(result.plan.payments[0].from.as_str(), "a");
/// assert_eq!(result.plan.payments[0].to.as_str(), "c");
/// assert_eq!(result.plan.payments[0].amount, Decimal::new(3000, 2));
/// ```
pub fn simplify(
    balances: &[DirectedBalance],
    currency: &str,
    tolerance: Decimal,
    step_number: u32,
) -> SimplificationResult {
    let netting = compute_net_balances(balances, step_number);
    let matching = match_debts(&netting.net_balances, currency, tolerance, step_number + 1);

    SimplificationResult {
        net_balances: netting.net_balances,
        plan: matching.plan,
        audit_steps: vec![netting.audit_step, matching.audit_step],
    }
}
