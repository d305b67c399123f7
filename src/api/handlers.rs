//! HTTP request handlers for the Agency Cost Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{Datelike, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::AuditTrace;
use crate::snapshot::{
    calculate_employee_cost_from_source, calculate_estimate_from_source, team_costs_from_source,
};

use super::request::{EmployeeCostRequest, EstimateRequestBody, TeamCostRequest};
use super::response::{
    ApiError, ApiErrorResponse, ENGINE_VERSION, EmployeeCostReport, EstimateReport, OfferDraft,
    TeamCostReport,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees/cost-breakdown", post(employee_cost_handler))
        .route("/team/costs", post(team_costs_handler))
        .route("/estimates", post(estimate_handler))
        .route("/offers", post(offer_handler))
        .with_state(state)
}

/// Handler for POST /employees/cost-breakdown.
async fn employee_cost_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeCostRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing employee cost request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let year = request.year.unwrap_or_else(current_year);

    let start_time = Instant::now();
    let result = request
        .snapshot
        .into_snapshot(state.config())
        .and_then(|snapshot| {
            calculate_employee_cost_from_source(&snapshot, &request.employee_id, year)
        });

    match result {
        Ok(result) => {
            let duration_us = start_time.elapsed().as_micros() as u64;
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                year,
                hourly_cost = %result.breakdown.hourly_cost,
                duration_us,
                "Employee cost calculated"
            );
            json_response(EmployeeCostReport {
                calculation_id: Uuid::new_v4(),
                timestamp: Utc::now(),
                engine_version: ENGINE_VERSION.to_string(),
                breakdown: result.breakdown,
                audit_trace: AuditTrace {
                    steps: result.audit_steps,
                    warnings: vec![],
                    duration_us,
                },
            })
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /team/costs.
async fn team_costs_handler(
    State(state): State<AppState>,
    payload: Result<Json<TeamCostRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing team cost request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let year = request.year.unwrap_or_else(current_year);

    let start_time = Instant::now();
    let result = request
        .snapshot
        .into_snapshot(state.config())
        .and_then(|snapshot| team_costs_from_source(&snapshot, year));

    match result {
        Ok(result) => {
            let duration_us = start_time.elapsed().as_micros() as u64;
            info!(
                correlation_id = %correlation_id,
                year,
                active_employee_count = result.summary.active_employee_count,
                total_yearly_cost = %result.summary.total_yearly_cost,
                duration_us,
                "Team costs calculated"
            );
            json_response(TeamCostReport {
                calculation_id: Uuid::new_v4(),
                timestamp: Utc::now(),
                engine_version: ENGINE_VERSION.to_string(),
                summary: result.summary,
                audit_trace: AuditTrace {
                    steps: result.audit_steps,
                    warnings: vec![],
                    duration_us,
                },
            })
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /estimates.
///
/// Insufficient staffing is reported in the body, not as an error.
async fn estimate_handler(
    State(state): State<AppState>,
    payload: Result<Json<EstimateRequestBody>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing estimate request");

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let year = body.year.unwrap_or_else(current_year);
    let (request, snapshot) = body.into_parts();

    let start_time = Instant::now();
    let result = snapshot
        .into_snapshot(state.config())
        .and_then(|snapshot| calculate_estimate_from_source(&snapshot, &request, year));

    match result {
        Ok(calculation) => {
            let duration_us = start_time.elapsed().as_micros() as u64;
            let estimate = calculation.result;
            info!(
                correlation_id = %correlation_id,
                year,
                staffing_state = ?estimate.staffing_state,
                final_price = %estimate.totals.final_price,
                duration_us,
                "Estimate calculated"
            );
            json_response(EstimateReport {
                calculation_id: Uuid::new_v4(),
                timestamp: Utc::now(),
                engine_version: ENGINE_VERSION.to_string(),
                can_create_offer: estimate.can_create_offer(),
                estimate,
                audit_trace: AuditTrace {
                    steps: calculation.audit_steps,
                    warnings: calculation.warnings,
                    duration_us,
                },
            })
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /offers.
///
/// Prices the estimate again and refuses to draft an offer while the
/// project is understaffed.
async fn offer_handler(
    State(state): State<AppState>,
    payload: Result<Json<EstimateRequestBody>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing offer request");

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let year = body.year.unwrap_or_else(current_year);
    let (request, snapshot) = body.into_parts();

    let start_time = Instant::now();
    let result = snapshot
        .into_snapshot(state.config())
        .and_then(|snapshot| calculate_estimate_from_source(&snapshot, &request, year))
        .and_then(|calculation| {
            calculation.result.ensure_offer_allowed()?;
            Ok(calculation)
        });

    match result {
        Ok(calculation) => {
            let duration_us = start_time.elapsed().as_micros() as u64;
            let estimate = calculation.result;
            let offer_id = Uuid::new_v4();
            info!(
                correlation_id = %correlation_id,
                offer_id = %offer_id,
                final_price = %estimate.totals.final_price,
                duration_us,
                "Offer drafted"
            );
            (
                StatusCode::CREATED,
                [(header::CONTENT_TYPE, "application/json")],
                Json(OfferDraft {
                    offer_id,
                    calculation_id: Uuid::new_v4(),
                    timestamp: Utc::now(),
                    engine_version: ENGINE_VERSION.to_string(),
                    final_price: estimate.totals.final_price,
                    total_with_vat: estimate.totals.total_with_vat,
                    estimate,
                    audit_trace: AuditTrace {
                        steps: calculation.audit_steps,
                        warnings: calculation.warnings,
                        duration_us,
                    },
                }),
            )
                .into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn current_year() -> i32 {
    Utc::now().year()
}

fn json_response<T: serde::Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation failed"
    );
    let api_error: ApiErrorResponse = err.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's message is in the body text
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
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}
