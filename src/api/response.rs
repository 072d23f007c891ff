//! Response types for the pricing engine API.
//!
//! This module defines the success payloads and the error envelope returned
//! by every endpoint.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{CostPerKmRating, MarginCheck, TrailerCostBreakdown, VehicleCostBreakdown};
use crate::error::EngineError;
use crate::models::{AuditTrace, CostBreakdown, MarginAlert, Severity};

/// Response body of the `/quote` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// Unique identifier of this quote.
    pub quote_id: Uuid,
    /// When the quote was computed.
    pub calculated_at: DateTime<Utc>,
    /// Version of the engine that produced the quote.
    pub engine_version: String,
    /// Costs, suggested price and profitability.
    pub breakdown: CostBreakdown,
    /// How each figure was obtained.
    pub audit_trace: AuditTrace,
    /// Alert raised by the configured margin thresholds.
    pub margin_alert: Option<MarginAlert>,
    /// Display severity of the margin.
    pub severity: Severity,
}

/// Response body of the `/margin-alert` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginAlertResponse {
    /// Alert, notification flag and next key.
    #[serde(flatten)]
    pub check: MarginCheck,
    /// Display severity of the margin.
    pub severity: Severity,
}

/// Response body of the `/fleet/vehicle-cost` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleCostResponse {
    /// Identifier of the costed vehicle.
    pub vehicle_id: String,
    /// Annual and per-kilometre costs.
    pub costs: VehicleCostBreakdown,
    /// Rating of the total cost per kilometre.
    pub rating: CostPerKmRating,
}

/// Response body of the `/fleet/trailer-cost` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailerCostResponse {
    /// Identifier of the costed trailer.
    pub trailer_id: String,
    /// Annual and per-kilometre costs.
    pub costs: TrailerCostBreakdown,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
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
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidSettings { field, message } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_SETTINGS",
                    format!("Invalid setting '{}': {}", field, message),
                    "Settings are used as amortization denominators and VAT rate",
                ),
            ),
            EngineError::InvalidRequest { field, message } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid field '{}': {}", field, message),
                    "The request contains a value that cannot describe a trip",
                ),
            ),
        }
    }
}
