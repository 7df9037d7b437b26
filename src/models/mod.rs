//! Core data models for the trip settlement engine.
//!
//! Inputs ([`ExpenseSplit`], [`SettlementRecord`]), the intermediate
//! balances, and the [`SettlementPlan`] output. Everything is recomputed from
//! the caller's snapshot on each call; nothing here is cached.

mod balance;
mod expense;
mod participant;
mod plan;
mod settlement_record;
mod settlement_result;
mod trip;

pub use balance::{DirectedBalance, NetBalance};
pub use expense::{ExpenseSplit, SplitShare};
pub use participant::ParticipantId;
pub use plan::{ParticipantSummary, PlannedPayment, SettlementPlan};
pub use settlement_record::SettlementRecord;
pub use settlement_result::{AuditStep, AuditTrace, AuditWarning, SettlementResult, WarningSeverity};
pub use trip::TripSnapshot;
