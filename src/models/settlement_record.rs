//! Recorded settlement payments.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{MONEY_DECIMAL_PLACES, exceeds_money_limit, has_sub_cent_digits};
use crate::error::{EngineError, EngineResult};

use super::ParticipantId;

/// A payment already made between two participants.
///
/// The amount reduces `from`'s debt to `to`. Settlements are an append-only
/// log supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRecord {
    /// Unique identifier for the settlement.
    pub id: String,
    /// The trip this settlement belongs to.
    pub trip_id: String,
    /// The participant who paid.
    pub from: ParticipantId,
    /// The participant who received the payment.
    pub to: ParticipantId,
    /// The amount paid.
    pub amount: Decimal,
}

impl SettlementRecord {
    /// Checks the structural invariants of the settlement.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSettlement` for blank ids, a payment from a
    /// participant to themselves, or an amount that is negative, has digits
    /// below one cent, or exceeds
    /// [`MAX_MONEY_AMOUNT`](crate::calculation::MAX_MONEY_AMOUNT).
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: &str| EngineError::InvalidSettlement {
            settlement_id: self.id.clone(),
            message: message.to_string(),
        };

        if self.id.trim().is_empty() {
            return Err(invalid("settlement id must not be empty"));
        }
        if self.trip_id.trim().is_empty() {
            return Err(invalid("trip id must not be empty"));
        }
        if self.from.is_blank() || self.to.is_blank() {
            return Err(invalid("payer and payee must not be empty"));
        }
        if self.from == self.to {
            return Err(invalid("payer and payee are the same participant"));
        }
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(invalid("amount must not be negative"));
        }
        if has_sub_cent_digits(self.amount) {
            return Err(EngineError::InvalidSettlement {
                settlement_id: self.id.clone(),
                message: format!(
                    "amount {} has more than {} decimal places",
                    self.amount, MONEY_DECIMAL_PLACES
                ),
            });
        }
        if exceeds_money_limit(self.amount) {
            return Err(invalid("amount exceeds the maximum amount"));
        }

        Ok(())
    }
}
