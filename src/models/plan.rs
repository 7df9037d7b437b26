//! Settlement plan models.
//!
//! A [`SettlementPlan`] is the engine's answer: an ordered list of payments
//! that, once made, leaves every participant of the trip at zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DirectedBalance, ParticipantId};

/// A single recommended payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedPayment {
    /// The participant who should pay.
    pub from: ParticipantId,
    /// The participant who should receive the payment.
    pub to: ParticipantId,
    /// The amount, rounded to two decimal places.
    pub amount: Decimal,
    /// The trip currency.
    pub currency: String,
}

/// The ordered set of payments that clears a trip's debts.
///
/// # Example
///
/// ```
/// use trip_settlement::models::{ParticipantId, PlannedPayment, SettlementPlan};
/// use rust_decimal::Decimal;
///
/// let plan = SettlementPlan {
///     currency: "USD".to_string(),
///     payments: vec![PlannedPayment {
///         from: ParticipantId::from("bob"),
///         to: ParticipantId::from("alice"),
///         amount: Decimal::new(2500, 2),
///         currency: "USD".to_string(),
///     }],
/// };
///
/// assert_eq!(plan.len(), 1);
/// assert_eq!(plan.total(), Decimal::new(2500, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPlan {
    /// The trip currency every payment is expressed in.
    pub currency: String,
    /// The payments, in the order they were matched.
    pub payments: Vec<PlannedPayment>,
}

impl SettlementPlan {
    /// Creates an empty plan in the given currency.
    pub fn empty(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            payments: Vec::new(),
        }
    }

    /// Returns true if nothing needs to be paid.
    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    /// Returns the number of payments.
    pub fn len(&self) -> usize {
        self.payments.len()
    }

    /// Returns the total value moved by the plan.
    pub fn total(&self) -> Decimal {
        self.payments.iter().map(|p| p.amount).sum()
    }

    /// Returns every participant named in the plan, in first-appearance order.
    pub fn participants(&self) -> Vec<ParticipantId> {
        let mut seen: Vec<ParticipantId> = Vec::new();
        for payment in &self.payments {
            for id in [&payment.from, &payment.to] {
                if !seen.contains(id) {
                    seen.push(id.clone());
                }
            }
        }
        seen
    }

    /// Converts the plan back into directed balances.
    ///
    /// Each payment `from -> to` becomes "`from` owes `to`", so the result can
    /// be fed through the simplifier again.
    pub fn to_directed_balances(&self) -> Vec<DirectedBalance> {
        self.payments
            .iter()
            .map(|p| DirectedBalance {
                debtor: p.from.clone(),
                creditor: p.to.clone(),
                amount: p.amount,
            })
            .collect()
    }
}

/// What a single participant pays and receives under a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSummary {
    /// The participant.
    pub participant: ParticipantId,
    /// Total the participant must pay.
    pub owes: Decimal,
    /// Total the participant will receive.
    pub owed: Decimal,
    /// `owed - owes`.
    pub net: Decimal,
}
