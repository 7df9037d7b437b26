//! Trip snapshot model.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

use super::{ExpenseSplit, SettlementRecord};

/// Everything the engine needs to settle one trip.
///
/// The snapshot may carry records from other trips; they are filtered out by
/// `trip_id` during aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripSnapshot {
    /// The trip to settle.
    pub trip_id: String,
    /// The trip's declared currency, used when no expense supplies one.
    #[serde(default)]
    pub currency: Option<String>,
    /// Expense splits recorded so far.
    #[serde(default)]
    pub expenses: Vec<ExpenseSplit>,
    /// Settlement payments recorded so far.
    #[serde(default)]
    pub settlements: Vec<SettlementRecord>,
}

impl TripSnapshot {
    /// Creates an empty snapshot for a trip.
    pub fn new(trip_id: impl Into<String>) -> Self {
        Self {
            trip_id: trip_id.into(),
            currency: None,
            expenses: Vec::new(),
            settlements: Vec::new(),
        }
    }

    /// Validates every expense and settlement in the snapshot.
    ///
    /// Stops at the first invalid record.
    pub fn validate(&self) -> EngineResult<()> {
        for expense in &self.expenses {
            expense.validate()?;
        }
        for settlement in &self.settlements {
            settlement.validate()?;
        }
        Ok(())
    }
}
