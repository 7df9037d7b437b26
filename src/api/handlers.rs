//! HTTP request handlers for the trip settlement API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::settle_trip;

use super::request::PlanRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/plan", post(plan_handler))
        .with_state(state)
}

/// Handler for POST /plan endpoint.
///
/// Accepts a trip's expenses and settlements and returns the settlement
/// plan with its audit trace.
async fn plan_handler(
    State(state): State<AppState>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing plan request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return ApiErrorResponse::bad_request(error)
                .with_correlation_id(correlation_id)
                .into_response();
        }
    };

    if request.trip_id.trim().is_empty() {
        warn!(correlation_id = %correlation_id, "Blank trip id");
        return ApiErrorResponse::bad_request(ApiError::validation_error(
            "trip_id must not be blank",
        ))
        .with_correlation_id(correlation_id)
        .into_response();
    }

    // Every named currency must be configured
    let config = state.config();
    for code in request.currencies() {
        if let Err(err) = config.get_currency(code) {
            warn!(
                correlation_id = %correlation_id,
                currency = %code,
                "Currency not supported"
            );
            return ApiErrorResponse::from(err)
                .with_correlation_id(correlation_id)
                .into_response();
        }
    }
    let trip_currency = match config.resolve_currency(request.currency.as_deref()) {
        Ok(code) => code,
        Err(err) => {
            return ApiErrorResponse::from(err)
                .with_correlation_id(correlation_id)
                .into_response();
        }
    };

    let snapshot = request.into_snapshot(&trip_currency);

    match settle_trip(&snapshot, state.settings()) {
        Ok(result) => {
            for warning in &result.audit_trace.warnings {
                warn!(
                    correlation_id = %correlation_id,
                    trip_id = %result.trip_id,
                    code = %warning.code,
                    "{}",
                    warning.message
                );
            }
            info!(
                correlation_id = %correlation_id,
                trip_id = %result.trip_id,
                expenses_count = snapshot.expenses.len(),
                settlements_count = snapshot.settlements.len(),
                payments_count = result.plan.len(),
                total = %result.plan.total(),
                duration_us = result.audit_trace.duration_us,
                "Plan computed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Plan computation failed"
            );
            ApiErrorResponse::from(err)
                .with_correlation_id(correlation_id)
                .into_response()
        }
    }
}
