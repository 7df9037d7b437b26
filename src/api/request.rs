//! Request types for the settlement API.
//!
//! This module defines the JSON request structures for the `/plan` endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ExpenseSplit, ParticipantId, SettlementRecord, SplitShare, TripSnapshot};

/// Request body for the `/plan` endpoint.
///
/// Nested records may omit `trip_id` and `currency`; they inherit the
/// request's values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    /// The trip to settle.
    pub trip_id: String,
    /// The trip currency, if the caller knows it.
    #[serde(default)]
    pub currency: Option<String>,
    /// Expense splits recorded for the trip.
    pub expenses: Vec<ExpenseRequest>,
    /// Settlements already paid.
    #[serde(default)]
    pub settlements: Vec<SettlementRequest>,
}

/// Expense information in a plan request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRequest {
    /// Unique identifier for the expense.
    pub id: String,
    /// The trip the expense belongs to; defaults to the request's trip.
    #[serde(default)]
    pub trip_id: Option<String>,
    /// The participant who paid.
    pub paid_by: ParticipantId,
    /// The expense currency; defaults to the trip currency.
    #[serde(default)]
    pub currency: Option<String>,
    /// Each participant's share.
    pub split_between: Vec<ShareRequest>,
}

/// A participant's share in a plan request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareRequest {
    /// The participant who owes the share.
    pub user_id: ParticipantId,
    /// The share amount.
    pub amount: Decimal,
}

/// Settlement information in a plan request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementRequest {
    /// Unique identifier for the settlement.
    pub id: String,
    /// The trip the settlement belongs to; defaults to the request's trip.
    #[serde(default)]
    pub trip_id: Option<String>,
    /// The participant who paid.
    pub from: ParticipantId,
    /// The participant who received the payment.
    pub to: ParticipantId,
    /// The amount paid.
    pub amount: Decimal,
}

impl PlanRequest {
    /// Returns every currency code named in the request, request-level first.
    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.currency
            .as_deref()
            .into_iter()
            .chain(self.expenses.iter().filter_map(|e| e.currency.as_deref()))
    }

    /// Converts the request into a domain snapshot.
    ///
    /// `trip_currency` fills in any expense without its own currency.
    pub fn into_snapshot(self, trip_currency: &str) -> TripSnapshot {
        let trip_id = self.trip_id;

        let expenses = self
            .expenses
            .into_iter()
            .map(|expense| ExpenseSplit {
                id: expense.id,
                trip_id: expense.trip_id.unwrap_or_else(|| trip_id.clone()),
                paid_by: expense.paid_by,
                currency: expense
                    .currency
                    .unwrap_or_else(|| trip_currency.to_string()),
                split_between: expense
                    .split_between
                    .into_iter()
                    .map(|share| SplitShare {
                        user_id: share.user_id,
                        amount: share.amount,
                    })
                    .collect(),
            })
            .collect();

        let settlements = self
            .settlements
            .into_iter()
            .map(|settlement| SettlementRecord {
                id: settlement.id,
                trip_id: settlement.trip_id.unwrap_or_else(|| trip_id.clone()),
                from: settlement.from,
                to: settlement.to,
                amount: settlement.amount,
            })
            .collect();

        TripSnapshot {
            trip_id,
            currency: self.currency,
            expenses,
            settlements,
        }
    }
}
