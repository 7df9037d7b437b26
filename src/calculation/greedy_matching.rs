//! Greedy creditor/debtor matching.
//!
//! The second phase of the balance simplifier: walks the creditor and debtor
//! lists with one cursor each and emits a payment for every match. This is
//! the usual minimum cash-flow heuristic. It produces at most
//! `creditors + debtors - 1` payments but is not guaranteed to find the
//! smallest possible number of payments.

use rust_decimal::Decimal;

use crate::models::{AuditStep, NetBalance, ParticipantId, PlannedPayment, SettlementPlan};

use super::money::round_money;

/// The result of matching debtors to creditors, including the audit step.
#[derive(Debug, Clone)]
pub struct MatchingResult {
    /// The payments, in match order.
    pub plan: SettlementPlan,
    /// The audit step recording this matching.
    pub audit_step: AuditStep,
}

struct Position<'a> {
    participant: &'a ParticipantId,
    remaining: Decimal,
}

/// Matches debtors against creditors to produce a settlement plan.
///
/// Creditors are participants whose net exceeds `tolerance`; debtors are
/// those whose net is below `-tolerance`. Both keep the order of
/// `net_balances`, which decides who is paid first when amounts tie.
///
/// Each round transfers the smaller of the current creditor's and debtor's
/// remaining amounts, emits it rounded to two decimal places, and advances
/// whichever cursor dropped below `tolerance` (possibly both).
///
/// # Examples
///
/// ```
/// use trip_settlement::calculation::match_debts;
/// use trip_settlement::models::{NetBalance, ParticipantId};
/// use rust_decimal::Decimal;
///
/// let nets = vec![
///     NetBalance { participant: ParticipantId::from("x"), amount: Decimal::new(10, 0) },
///     NetBalance { participant: ParticipantId::from("y"), amount: Decimal::new(10, 0) },
///     NetBalance { participant: ParticipantId::from("z"), amount: Decimal::new(-20, 0) },
/// ];
///
/// let result = match_debts(&nets, "USD", Decimal::new(1, 2), 3);
/// let payees: Vec<&str> = result.plan.payments.iter().map(|p| p.to.as_str()).collect();
/// assert_eq!(payees, vec!["x", "y"]);
/// ```
pub fn match_debts(
    net_balances: &[NetBalance],
    currency: &str,
    tolerance: Decimal,
    step_number: u32,
) -> MatchingResult {
    let mut creditors: Vec<Position> = net_balances
        .iter()
        .filter(|n| n.is_creditor(tolerance))
        .map(|n| Position {
            participant: &n.participant,
            remaining: n.amount,
        })
        .collect();

    let mut debtors: Vec<Position> = net_balances
        .iter()
        .filter(|n| n.is_debtor(tolerance))
        .map(|n| Position {
            participant: &n.participant,
            remaining: -n.amount,
        })
        .collect();

    let creditor_count = creditors.len();
    let debtor_count = debtors.len();
    let mut payments: Vec<PlannedPayment> = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);

    while i < creditors.len() && j < debtors.len() {
        let transfer = creditors[i].remaining.min(debtors[j].remaining);

        payments.push(PlannedPayment {
            from: debtors[j].participant.clone(),
            to: creditors[i].participant.clone(),
            amount: round_money(transfer),
            currency: currency.to_string(),
        });

        creditors[i].remaining -= transfer;
        debtors[j].remaining -= transfer;

        if creditors[i].remaining < tolerance {
            i += 1;
        }
        if debtors[j].remaining < tolerance {
            j += 1;
        }
    }

    let plan = SettlementPlan {
        currency: currency.to_string(),
        payments,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "greedy_matching".to_string(),
        rule_name: "Greedy Debt Matching".to_string(),
        input: serde_json::json!({
            "creditor_count": creditor_count,
            "debtor_count": debtor_count,
            "tolerance": tolerance.normalize().to_string()
        }),
        output: serde_json::json!({
            "payment_count": plan.len(),
            "total": plan.total().to_string(),
            "currency": currency
        }),
        reasoning: format!(
            "{} debtor(s) matched against {} creditor(s) in {} payment(s)",
            debtor_count,
            creditor_count,
            plan.len()
        ),
    };

    MatchingResult { plan, audit_step }
}
