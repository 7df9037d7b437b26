//! Calculation logic for the trip settlement engine.
//!
//! This module contains ledger aggregation of expenses and settlements,
//! the two phases of balance simplification (netting and greedy matching),
//! read-only queries and verification over a finished plan, and
//! `settle_trip`, which runs the whole pipeline with an audit trace.

mod greedy_matching;
mod ledger_aggregation;
mod money;
mod netting;
mod plan_queries;
mod plan_verification;
mod settle_trip;
mod simplify;

pub use greedy_matching::{MatchingResult, match_debts};
pub use ledger_aggregation::{AggregationResult, aggregate_ledger};
pub use money::{
    DEFAULT_TOLERANCE, MAX_MONEY_AMOUNT, MONEY_DECIMAL_PLACES, exceeds_money_limit,
    has_sub_cent_digits, is_negligible, round_money,
};
pub use netting::{NettingResult, compute_net_balances};
pub use plan_queries::{summarize_participant, summarize_plan, total_owed_by, total_owed_to};
pub use plan_verification::{PlanVerification, verify_plan};
pub use settle_trip::{
    WARNING_MIXED_CURRENCY, WARNING_OVERPAYMENT, WARNING_UNBALANCED_PLAN, settle_trip,
};
pub use simplify::{SimplificationResult, simplify};
