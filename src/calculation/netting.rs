//! Netting phase of the balance simplifier.
//!
//! Collapses pairwise balances into one signed position per participant.
//! Transitive debts disappear here: if A owes B and B owes C the same amount,
//! B nets to zero and only A and C remain.

use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::models::{AuditStep, DirectedBalance, NetBalance, ParticipantId};

/// The result of netting directed balances, including the audit step.
#[derive(Debug, Clone)]
pub struct NettingResult {
    /// One entry per participant, in first-encounter order.
    pub net_balances: Vec<NetBalance>,
    /// The audit step recording this netting.
    pub audit_step: AuditStep,
}

/// Computes each participant's net position.
///
/// For every balance the amount is subtracted from the debtor and added to
/// the creditor. Participants are listed in the order they are first seen,
/// debtor before creditor, which fixes the tie-break order used by
/// [`match_debts`](super::match_debts).
///
/// # Examples
///
/// ```
/// use trip_settlement::calculation::compute_net_balances;
/// use trip_settlement::models::DirectedBalance;
/// use rust_decimal::Decimal;
///
/// let chain = vec![
///     DirectedBalance::new("a", "b", Decimal::new(30, 0)),
///     DirectedBalance::new("b", "c", Decimal::new(30, 0)),
/// ];
/// let result = compute_net_balances(&chain, 2);
///
/// let amounts: Vec<Decimal> = result.net_balances.iter().map(|n| n.amount).collect();
/// assert_eq!(amounts, vec![Decimal::new(-30, 0), Decimal::ZERO, Decimal::new(30, 0)]);
/// ```
pub fn compute_net_balances(balances: &[DirectedBalance], step_number: u32) -> NettingResult {
    let positions = net_positions(balances);

    let net_balances: Vec<NetBalance> = positions
        .into_iter()
        .map(|(participant, amount)| NetBalance {
            participant,
            amount,
        })
        .collect();

    let owed_total: Decimal = net_balances
        .iter()
        .filter(|n| n.amount.is_sign_positive())
        .map(|n| n.amount)
        .sum();
    let sum: Decimal = net_balances.iter().map(|n| n.amount).sum();

    let audit_step = AuditStep {
        step_number,
        rule_id: "netting".to_string(),
        rule_name: "Net Balance Computation".to_string(),
        input: serde_json::json!({
            "balance_count": balances.len()
        }),
        output: serde_json::json!({
            "participant_count": net_balances.len(),
            "owed_total": owed_total.normalize().to_string(),
            "sum": sum.normalize().to_string()
        }),
        reasoning: format!(
            "{} directed balance(s) netted into {} participant position(s); {} owed in total",
            balances.len(),
            net_balances.len(),
            owed_total.normalize()
        ),
    };

    NettingResult {
        net_balances,
        audit_step,
    }
}

/// Accumulates signed positions keyed by participant, in first-encounter
/// order.
pub(crate) fn net_positions(balances: &[DirectedBalance]) -> IndexMap<ParticipantId, Decimal> {
    let mut positions: IndexMap<ParticipantId, Decimal> = IndexMap::new();

    for balance in balances {
        *positions
            .entry(balance.debtor.clone())
            .or_insert(Decimal::ZERO) -= balance.amount;
        *positions
            .entry(balance.creditor.clone())
            .or_insert(Decimal::ZERO) += balance.amount;
    }

    positions
}
