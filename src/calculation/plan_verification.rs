//! Checks that a plan actually clears the balances it was built from.

use rust_decimal::Decimal;

use crate::models::{NetBalance, ParticipantId, SettlementPlan};

/// Outcome of replaying a plan against the net balances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanVerification {
    /// Participants left outside tolerance after every payment is applied.
    pub residuals: Vec<NetBalance>,
    /// True when `residuals` is empty.
    pub balanced: bool,
}

/// Applies every payment to the net balances and reports what is left over.
///
/// A payment from `x` to `y` raises `x`'s position and lowers `y`'s. A
/// participant is a residual when the magnitude of what remains exceeds
/// `tolerance`; positions of exactly `tolerance` count as settled, matching
/// the creditor and debtor thresholds used when the plan was built.
///
/// # Examples
///
/// ```
/// use trip_settlement::calculation::{simplify, verify_plan, DEFAULT_TOLERANCE};
/// use trip_settlement::models::DirectedBalance;
/// use rust_decimal::Decimal;
///
/// let balances = vec![DirectedBalance::new("bob", "alice", Decimal::new(1999, 2))];
/// let result = simplify(&balances, "USD", DEFAULT_TOLERANCE, 1);
///
/// let verification = verify_plan(&result.plan, &result.net_balances, DEFAULT_TOLERANCE);
/// assert!(verification.balanced);
/// ```
pub fn verify_plan(
    plan: &SettlementPlan,
    net_balances: &[NetBalance],
    tolerance: Decimal,
) -> PlanVerification {
    let mut remaining: Vec<NetBalance> = net_balances.to_vec();

    for payment in &plan.payments {
        apply(&mut remaining, payment.from.clone(), payment.amount);
        apply(&mut remaining, payment.to.clone(), -payment.amount);
    }

    let residuals: Vec<NetBalance> = remaining
        .into_iter()
        .filter(|n| n.amount.abs() > tolerance)
        .collect();

    PlanVerification {
        balanced: residuals.is_empty(),
        residuals,
    }
}

fn apply(positions: &mut Vec<NetBalance>, participant: ParticipantId, delta: Decimal) {
    match positions.iter_mut().find(|n| n.participant == participant) {
        Some(position) => position.amount += delta,
        None => positions.push(NetBalance {
            participant,
            amount: delta,
        }),
    }
}
