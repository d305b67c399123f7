//! Response types for the Agency Cost Engine API.
//!
//! This module defines the report envelopes returned on success and the
//! error response structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{AuditTrace, EmployeeCostBreakdown, EstimateResult, TeamCostSummary};

/// The version of the engine stamped into every report.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Response body for `POST /employees/cost-breakdown`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCostReport {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced the report.
    pub engine_version: String,
    /// The layered cost breakdown.
    pub breakdown: EmployeeCostBreakdown,
    /// How each figure was derived.
    pub audit_trace: AuditTrace,
}

/// Response body for `POST /team/costs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamCostReport {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced the report.
    pub engine_version: String,
    /// Per-employee breakdowns and team totals.
    pub summary: TeamCostSummary,
    /// How each figure was derived.
    pub audit_trace: AuditTrace,
}

/// Response body for `POST /estimates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateReport {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced the report.
    pub engine_version: String,
    /// The priced estimate and its staffing state.
    pub estimate: EstimateResult,
    /// Whether an offer may be created from this estimate.
    pub can_create_offer: bool,
    /// How each figure was derived.
    pub audit_trace: AuditTrace,
}

/// Response body for `POST /offers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferDraft {
    /// Unique identifier for the offer.
    pub offer_id: Uuid,
    /// Unique identifier for the calculation behind the offer.
    pub calculation_id: Uuid,
    /// When the offer was drafted.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced the offer.
    pub engine_version: String,
    /// Price quoted before VAT.
    pub final_price: Decimal,
    /// Price quoted including VAT.
    pub total_with_vat: Decimal,
    /// The estimate the offer was drafted from.
    pub estimate: EstimateResult,
    /// How each figure was derived.
    pub audit_trace: AuditTrace,
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

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
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
            EngineError::DivisionByZero { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "DIVISION_BY_ZERO",
                    message,
                    "The snapshot leaves nothing to divide costs over",
                ),
            },
            EngineError::InvalidInput { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    message,
                    format!("Check the value of '{}'", field),
                ),
            },
            EngineError::InsufficientStaffing {
                shortfall_hours, ..
            } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "INSUFFICIENT_STAFFING",
                    message,
                    format!("Assign {} more hours before creating an offer", shortfall_hours),
                ),
            },
            EngineError::EmployeeNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("EMPLOYEE_NOT_FOUND", message),
            },
            EngineError::ServiceNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("SERVICE_NOT_FOUND", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_insufficient_staffing_is_unprocessable() {
        let api_error: ApiErrorResponse = EngineError::InsufficientStaffing {
            required_hours: Decimal::from(40),
            assigned_hours: Decimal::from(32),
            shortfall_hours: Decimal::from(8),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api_error.error.code, "INSUFFICIENT_STAFFING");
        assert!(api_error.error.details.unwrap().contains('8'));
    }

    #[test]
    fn test_engine_error_statuses() {
        let cases: Vec<(EngineError, StatusCode, &str)> = vec![
            (
                EngineError::division_by_zero("no active employees"),
                StatusCode::UNPROCESSABLE_ENTITY,
                "DIVISION_BY_ZERO",
            ),
            (
                EngineError::invalid("vacation_days", "must be at most 60"),
                StatusCode::BAD_REQUEST,
                "INVALID_INPUT",
            ),
            (
                EngineError::EmployeeNotFound {
                    employee_id: "emp_404".to_string(),
                },
                StatusCode::NOT_FOUND,
                "EMPLOYEE_NOT_FOUND",
            ),
            (
                EngineError::ServiceNotFound {
                    service_id: "svc_404".to_string(),
                },
                StatusCode::NOT_FOUND,
                "SERVICE_NOT_FOUND",
            ),
            (
                EngineError::ConfigNotFound {
                    path: "company.yaml".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
            ),
        ];

        for (error, status, code) in cases {
            let api_error: ApiErrorResponse = error.into();
            assert_eq!(api_error.status, status);
            assert_eq!(api_error.error.code, code);
        }
    }
}
