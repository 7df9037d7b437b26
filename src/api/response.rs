//! Error responses for the settlement API.
//!
//! Successful requests return a [`SettlementResult`](crate::models::SettlementResult)
//! directly; everything else is an [`ApiError`] body with a stable code.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;

/// Body of every non-200 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Stable error code, e.g. `UNSUPPORTED_CURRENCY`.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Correlation id of the request, matching the server logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<Uuid>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            correlation_id: None,
        }
    }

    /// Creates a `VALIDATION_ERROR` for a request body missing required data.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a `MALFORMED_JSON` error for a body that does not parse.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Attaches explanatory details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Tags the error with the request's correlation id.
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }
}

/// An [`ApiError`] paired with the HTTP status it is sent with.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    /// Tags the body with the request's correlation id.
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.error = self.error.with_correlation_id(correlation_id);
        self
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

/// Status and stable code for each engine error.
fn classify(error: &EngineError) -> (StatusCode, &'static str) {
    match error {
        EngineError::ConfigNotFound { .. }
        | EngineError::ConfigParseError { .. }
        | EngineError::InvalidConfig { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
        EngineError::UnsupportedCurrency { .. } => (StatusCode::BAD_REQUEST, "UNSUPPORTED_CURRENCY"),
        EngineError::InvalidExpense { .. } => (StatusCode::BAD_REQUEST, "INVALID_EXPENSE"),
        EngineError::InvalidSettlement { .. } => (StatusCode::BAD_REQUEST, "INVALID_SETTLEMENT"),
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let (status, code) = classify(&error);

        // Configuration problems are the operator's, not the caller's.
        let error = if status.is_server_error() {
            ApiError::new(code, "Configuration error").with_details(error.to_string())
        } else {
            ApiError::new(code, error.to_string())
        };

        ApiErrorResponse { status, error }
    }
}
