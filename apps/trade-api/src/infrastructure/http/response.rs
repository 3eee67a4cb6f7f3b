//! HTTP response DTOs and error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::services::TradeServiceError;

/// Uniform response envelope for all endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Human-readable message, set on writes and failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying a payload.
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Successful response carrying only a message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Current value of one ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerValueResponse {
    /// The requested ticker.
    pub ticker: String,
    /// Mean of all recorded trade prices.
    pub value: Decimal,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Service error wrapper that maps onto HTTP status codes.
#[derive(Debug)]
pub struct ApiError(pub TradeServiceError);

impl From<TradeServiceError> for ApiError {
    fn from(error: TradeServiceError) -> Self {
        Self(error)
    }
}

impl ApiError {
    /// HTTP status for the wrapped error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self.0 {
            TradeServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            TradeServiceError::TickerNotFound { .. } => StatusCode::NOT_FOUND,
            TradeServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ApiResponse::<()> {
            success: false,
            message: Some(self.0.to_string()),
            data: None,
        };
        (status, Json(body)).into_response()
    }
}
