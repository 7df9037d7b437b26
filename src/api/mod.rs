//! HTTP API module for the trip settlement engine.
//!
//! This module provides the REST endpoint that computes a settlement plan
//! for a trip's expenses and settlements.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ExpenseRequest, PlanRequest, SettlementRequest, ShareRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
