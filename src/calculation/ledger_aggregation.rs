//! Ledger aggregation.
//!
//! Folds a trip's expense splits and recorded settlements into pairwise
//! debtor to creditor balances.

use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::config::{EngineSettings, NegativeBalancePolicy};
use crate::models::{AuditStep, DirectedBalance, ExpenseSplit, ParticipantId, SettlementRecord};

use super::money::is_negligible;

type PairKey = (ParticipantId, ParticipantId);

/// The result of aggregating a trip's ledger, including the audit step.
#[derive(Debug, Clone)]
pub struct AggregationResult {
    /// Non-negligible pairwise balances, in the order each pair was first
    /// touched.
    pub balances: Vec<DirectedBalance>,
    /// Currency of the first expense belonging to the trip, if any.
    pub currency: Option<String>,
    /// Every distinct expense currency seen for the trip, in order.
    pub currencies_seen: Vec<String>,
    /// Pairs that settlements pushed below zero, before the negative-balance
    /// policy was applied.
    pub overpaid_pairs: Vec<DirectedBalance>,
    /// The audit step recording this aggregation.
    pub audit_step: AuditStep,
}

/// Aggregates expenses and settlements for one trip into directed balances.
///
/// For every expense of the trip, each share owed by someone other than the
/// payer is added to the pair (participant, payer). Every settlement of the
/// trip is then subtracted from the pair (from, to), creating the pair if it
/// does not exist yet. Records from other trips are ignored.
///
/// After all adjustments, pairs driven negative are handled according to
/// `settings.negative_balance_policy` and pairs whose magnitude is below
/// `settings.tolerance` are dropped.
///
/// # Arguments
///
/// * `expenses` - Expense splits, possibly spanning several trips
/// * `settlements` - Recorded settlement payments, possibly spanning several trips
/// * `trip_id` - The trip to aggregate
/// * `settings` - Tolerance and negative-balance policy
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use trip_settlement::calculation::aggregate_ledger;
/// use trip_settlement::config::EngineSettings;
/// use trip_settlement::models::{ExpenseSplit, ParticipantId, SettlementRecord, SplitShare};
/// use rust_decimal::Decimal;
///
/// let expense = ExpenseSplit {
///     id: "exp_001".to_string(),
///     trip_id: "trip_001".to_string(),
///     paid_by: ParticipantId::from("alice"),
///     currency: "USD".to_string(),
///     split_between: vec![SplitShare { user_id: ParticipantId::from("bob"), amount: Decimal::new(5000, 2) }],
/// };
/// let partial = SettlementRecord {
///     id: "set_001".to_string(),
///     trip_id: "trip_001".to_string(),
///     from: ParticipantId::from("bob"),
///     to: ParticipantId::from("alice"),
///     amount: Decimal::new(2000, 2),
/// };
///
/// let result = aggregate_ledger(&[expense], &[partial], "trip_001", &EngineSettings::default(), 1);
/// assert_eq!(result.balances.len(), 1);
/// assert_eq!(result.balances[0].amount, Decimal::new(3000, 2));
/// assert_eq!(result.currency.as_deref(), Some("USD"));
/// ```
pub fn aggregate_ledger(
    expenses: &[ExpenseSplit],
    settlements: &[SettlementRecord],
    trip_id: &str,
    settings: &EngineSettings,
    step_number: u32,
) -> AggregationResult {
    let tolerance = settings.tolerance;
    let mut pairs: IndexMap<PairKey, Decimal> = IndexMap::new();
    let mut currencies_seen: Vec<String> = Vec::new();
    let mut expense_count = 0usize;
    let mut settlement_count = 0usize;

    for expense in expenses.iter().filter(|e| e.trip_id == trip_id) {
        expense_count += 1;
        if !currencies_seen.contains(&expense.currency) {
            currencies_seen.push(expense.currency.clone());
        }

        for share in expense.owed_shares() {
            *pairs
                .entry((share.user_id.clone(), expense.paid_by.clone()))
                .or_insert(Decimal::ZERO) += share.amount;
        }
    }

    for settlement in settlements.iter().filter(|s| s.trip_id == trip_id) {
        settlement_count += 1;
        // A payment to oneself moves no money.
        if settlement.from == settlement.to {
            continue;
        }

        *pairs
            .entry((settlement.from.clone(), settlement.to.clone()))
            .or_insert(Decimal::ZERO) -= settlement.amount;
    }

    let overpaid_pairs: Vec<DirectedBalance> = pairs
        .iter()
        .filter(|(_, amount)| amount.is_sign_negative() && !is_negligible(**amount, tolerance))
        .map(|((debtor, creditor), amount)| DirectedBalance {
            debtor: debtor.clone(),
            creditor: creditor.clone(),
            amount: *amount,
        })
        .collect();

    let touched_pairs = pairs.len();
    let adjusted = match settings.negative_balance_policy {
        NegativeBalancePolicy::Normalize => normalize_pairs(pairs),
        NegativeBalancePolicy::Signed => pairs,
    };

    let balances: Vec<DirectedBalance> = adjusted
        .into_iter()
        .filter(|(_, amount)| !is_negligible(*amount, tolerance))
        .map(|((debtor, creditor), amount)| DirectedBalance {
            debtor,
            creditor,
            amount,
        })
        .collect();

    let currency = currencies_seen.first().cloned();
    let outstanding: Decimal = balances.iter().map(|b| b.amount).sum();

    let audit_step = AuditStep {
        step_number,
        rule_id: "ledger_aggregation".to_string(),
        rule_name: "Ledger Aggregation".to_string(),
        input: serde_json::json!({
            "trip_id": trip_id,
            "expense_count": expense_count,
            "settlement_count": settlement_count,
            "negative_balance_policy": settings.negative_balance_policy.as_str(),
            "tolerance": tolerance.normalize().to_string()
        }),
        output: serde_json::json!({
            "pair_count": balances.len(),
            "pruned_pairs": touched_pairs.saturating_sub(balances.len()),
            "overpaid_pairs": overpaid_pairs.len(),
            "outstanding": outstanding.normalize().to_string(),
            "currency": currency
        }),
        reasoning: format!(
            "{} expense(s) and {} settlement(s) for trip '{}' folded into {} directed balance(s)",
            expense_count,
            settlement_count,
            trip_id,
            balances.len()
        ),
    };

    AggregationResult {
        balances,
        currency,
        currencies_seen,
        overpaid_pairs,
        audit_step,
    }
}

/// Flips negative pairs so every obligation points from debtor to creditor
/// with a non-negative amount, merging into the opposite pair when present.
fn normalize_pairs(pairs: IndexMap<PairKey, Decimal>) -> IndexMap<PairKey, Decimal> {
    let mut normalized: IndexMap<PairKey, Decimal> = IndexMap::with_capacity(pairs.len());

    for ((debtor, creditor), amount) in pairs {
        let (key, amount) = if amount.is_sign_negative() {
            ((creditor, debtor), -amount)
        } else {
            ((debtor, creditor), amount)
        };
        *normalized.entry(key).or_insert(Decimal::ZERO) += amount;
    }

    normalized
}
