//! Intermediate balance types produced while settling a trip.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ParticipantId;

/// A single debtor to creditor obligation.
///
/// Produced by ledger aggregation. Under the `normalize` negative-balance
/// policy the amount is always positive; under `signed` an overpaid pair
/// keeps a negative amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectedBalance {
    /// The participant who owes.
    pub debtor: ParticipantId,
    /// The participant who is owed.
    pub creditor: ParticipantId,
    /// The amount owed.
    pub amount: Decimal,
}

impl DirectedBalance {
    /// Creates a directed balance.
    pub fn new(
        debtor: impl Into<ParticipantId>,
        creditor: impl Into<ParticipantId>,
        amount: Decimal,
    ) -> Self {
        Self {
            debtor: debtor.into(),
            creditor: creditor.into(),
            amount,
        }
    }

    /// Returns the same obligation with debtor and creditor swapped and the
    /// amount negated.
    ///
    /// # Example
    ///
    /// ```
    /// use trip_settlement::models::DirectedBalance;
    /// use rust_decimal::Decimal;
    ///
    /// let overpaid = DirectedBalance::new("bob", "alice", Decimal::new(-500, 2));
    /// let flipped = overpaid.reversed();
    /// assert_eq!(flipped.debtor.as_str(), "alice");
    /// assert_eq!(flipped.amount, Decimal::new(500, 2));
    /// ```
    pub fn reversed(&self) -> Self {
        Self {
            debtor: self.creditor.clone(),
            creditor: self.debtor.clone(),
            amount: -self.amount,
        }
    }
}

/// A participant's signed position across the whole trip.
///
/// Positive means others owe them, negative means they owe others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetBalance {
    /// The participant.
    pub participant: ParticipantId,
    /// The signed net amount.
    pub amount: Decimal,
}

impl NetBalance {
    /// Returns true if the participant is owed more than `tolerance`.
    pub fn is_creditor(&self, tolerance: Decimal) -> bool {
        self.amount > tolerance
    }

    /// Returns true if the participant owes more than `tolerance`.
    pub fn is_debtor(&self, tolerance: Decimal) -> bool {
        self.amount < -tolerance
    }
}
