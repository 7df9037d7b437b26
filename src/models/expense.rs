//! Expense split model.
//!
//! An [`ExpenseSplit`] records who paid for something and how much each
//! participant's share of it was. Split strategies (equal, percentage,
//! custom) are resolved before the split reaches the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{MONEY_DECIMAL_PLACES, exceeds_money_limit, has_sub_cent_digits};
use crate::error::{EngineError, EngineResult};

use super::ParticipantId;

/// One participant's share of an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitShare {
    /// The participant who owes this share.
    pub user_id: ParticipantId,
    /// The amount of the share.
    pub amount: Decimal,
}

/// A shared expense with its per-participant shares already computed.
///
/// # Example
///
/// ```
/// use trip_settlement::models::{ExpenseSplit, ParticipantId, SplitShare};
/// use rust_decimal::Decimal;
///
/// let dinner = ExpenseSplit {
///     id: "exp_001".to_string(),
///     trip_id: "trip_lisbon".to_string(),
///     paid_by: ParticipantId::from("alice"),
///     currency: "EUR".to_string(),
///     split_between: vec![
///         SplitShare { user_id: ParticipantId::from("alice"), amount: Decimal::new(3000, 2) },
///         SplitShare { user_id: ParticipantId::from("bob"), amount: Decimal::new(3000, 2) },
///     ],
/// };
///
/// // Alice's own share is not a debt.
/// assert_eq!(dinner.owed_shares().count(), 1);
/// assert_eq!(dinner.total(), Decimal::new(6000, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseSplit {
    /// Unique identifier for the expense.
    pub id: String,
    /// The trip this expense belongs to.
    pub trip_id: String,
    /// The participant who paid.
    pub paid_by: ParticipantId,
    /// ISO currency code the expense was recorded in.
    pub currency: String,
    /// Each participant's share of the expense.
    pub split_between: Vec<SplitShare>,
}

impl ExpenseSplit {
    /// Returns the shares that create a debt to the payer.
    ///
    /// The payer's own share, if listed, is skipped.
    pub fn owed_shares(&self) -> impl Iterator<Item = &SplitShare> {
        self.split_between
            .iter()
            .filter(move |share| share.user_id != self.paid_by)
    }

    /// Returns the sum of all shares, including the payer's own.
    pub fn total(&self) -> Decimal {
        self.split_between.iter().map(|share| share.amount).sum()
    }

    /// Checks the structural invariants of the expense.
    ///
    /// # Errors
    ///
    /// Returns `InvalidExpense` when the id, trip id, payer or a share's
    /// participant is blank, when there are no shares, or when any share
    /// amount is negative, has digits below one cent, or exceeds
    /// [`MAX_MONEY_AMOUNT`](crate::calculation::MAX_MONEY_AMOUNT).
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidExpense {
            expense_id: self.id.clone(),
            message,
        };

        if self.id.trim().is_empty() {
            return Err(invalid("expense id must not be empty".to_string()));
        }
        if self.trip_id.trim().is_empty() {
            return Err(invalid("trip id must not be empty".to_string()));
        }
        if self.paid_by.is_blank() {
            return Err(invalid("payer must not be empty".to_string()));
        }
        if self.split_between.is_empty() {
            return Err(invalid("split must name at least one participant".to_string()));
        }

        for share in &self.split_between {
            if share.user_id.is_blank() {
                return Err(invalid("share participant must not be empty".to_string()));
            }
            if share.amount.is_sign_negative() && !share.amount.is_zero() {
                return Err(invalid(format!(
                    "negative share of {} for '{}'",
                    share.amount, share.user_id
                )));
            }
            if has_sub_cent_digits(share.amount) {
                return Err(invalid(format!(
                    "share of {} for '{}' has more than {} decimal places",
                    share.amount, share.user_id, MONEY_DECIMAL_PLACES
                )));
            }
            if exceeds_money_limit(share.amount) {
                return Err(invalid(format!(
                    "share of {} for '{}' exceeds the maximum amount",
                    share.amount, share.user_id
                )));
            }
        }

        Ok(())
    }
}
