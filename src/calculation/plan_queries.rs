//! Read-only queries over a computed settlement plan.
//!
//! These back the "you owe" and "owed to you" summaries shown to each
//! participant.

use rust_decimal::Decimal;

use crate::models::{ParticipantId, ParticipantSummary, SettlementPlan};

/// Returns the total the participant must pay under the plan.
///
/// # Examples
///
/// ```
/// use trip_settlement::calculation::{total_owed_by, total_owed_to};
/// use trip_settlement::models::{ParticipantId, PlannedPayment, SettlementPlan};
/// use rust_decimal::Decimal;
///
/// let plan = SettlementPlan {
///     currency: "USD".to_string(),
///     payments: vec![PlannedPayment {
///         from: ParticipantId::from("bob"),
///         to: ParticipantId::from("alice"),
///         amount: Decimal::new(1500, 2),
///         currency: "USD".to_string(),
///     }],
/// };
///
/// assert_eq!(total_owed_by(&plan, &ParticipantId::from("bob")), Decimal::new(1500, 2));
/// assert_eq!(total_owed_to(&plan, &ParticipantId::from("bob")), Decimal::ZERO);
/// ```
pub fn total_owed_by(plan: &SettlementPlan, participant: &ParticipantId) -> Decimal {
    plan.payments
        .iter()
        .filter(|p| &p.from == participant)
        .map(|p| p.amount)
        .sum()
}

/// Returns the total the participant will receive under the plan.
pub fn total_owed_to(plan: &SettlementPlan, participant: &ParticipantId) -> Decimal {
    plan.payments
        .iter()
        .filter(|p| &p.to == participant)
        .map(|p| p.amount)
        .sum()
}

/// Summarizes what one participant pays and receives.
///
/// A participant absent from the plan gets an all-zero summary.
pub fn summarize_participant(plan: &SettlementPlan, participant: &ParticipantId) -> ParticipantSummary {
    let owes = total_owed_by(plan, participant);
    let owed = total_owed_to(plan, participant);

    ParticipantSummary {
        participant: participant.clone(),
        owes,
        owed,
        net: owed - owes,
    }
}

/// Summarizes every participant named in the plan, in first-appearance
/// order.
pub fn summarize_plan(plan: &SettlementPlan) -> Vec<ParticipantSummary> {
    plan.participants()
        .iter()
        .map(|participant| summarize_participant(plan, participant))
        .collect()
}
