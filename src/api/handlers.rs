//! HTTP request handlers for the compensation engine API.
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
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    RngSource, TestRunOptions, build_leave_register, calculate_ctc, run_payroll_test,
};

use super::request::{CtcRequest, LeaveRegisterRequest, TestRunRequest};
use super::response::{ApiError, ApiErrorResponse, CalculationEnvelope};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ctc", post(ctc_handler))
        .route("/test-run", post(test_run_handler))
        .route("/leave-register", post(leave_register_handler))
        .with_state(state)
}

/// Handler for POST /ctc.
async fn ctc_handler(
    State(state): State<AppState>,
    payload: Result<Json<CtcRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing CTC request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = state.config();
    let input = request.into_input(&config.structure().ctc_defaults);

    let start_time = Instant::now();
    match calculate_ctc(&input, config) {
        Ok(breakdown) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                regime = %input.regime,
                monthly_gross = %breakdown.gross.monthly,
                monthly_net = %breakdown.net_pay.monthly,
                warnings = breakdown.audit_trace.warnings.len(),
                duration_us = duration.as_micros(),
                "CTC calculation completed successfully"
            );
            success_response(correlation_id, breakdown, duration.as_micros() as u64)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "CTC calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /test-run.
async fn test_run_handler(
    State(state): State<AppState>,
    payload: Result<Json<TestRunRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll test run request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let today = request.today.unwrap_or_else(|| Utc::now().date_naive());
    let period = match request.date_range.resolve(today) {
        Ok(period) => period,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid test run period");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let options = TestRunOptions {
        include_bonus: request.include_bonus,
        bonus_percentage: request.bonus_percentage,
    };
    let mut source = match request.seed {
        Some(seed) => RngSource(StdRng::seed_from_u64(seed)),
        None => RngSource(StdRng::from_os_rng()),
    };

    let start_time = Instant::now();
    match run_payroll_test(
        &request.employees,
        &request.attendance,
        period,
        &options,
        state.config(),
        &mut source,
    ) {
        Ok(report) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                start = %report.period.start,
                end = %report.period.end,
                employees = report.summary.total_employees,
                total_gross = %report.summary.total_gross_salary,
                total_net = %report.summary.total_net_salary,
                duration_us = duration.as_micros(),
                "Payroll test run completed successfully"
            );
            success_response(correlation_id, report, duration.as_micros() as u64)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Payroll test run failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /leave-register.
async fn leave_register_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveRegisterRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave register request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match build_leave_register(
        &request.establishment,
        request.department.as_deref(),
        request.year,
        &request.employees,
        &request.attendance,
        &request.leave_requests,
        &state.config().rates().leave,
    ) {
        Ok(register) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                year = register.year,
                entries = register.entries.len(),
                duration_us = duration.as_micros(),
                "Leave register built successfully"
            );
            success_response(correlation_id, register, duration.as_micros() as u64)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Leave register failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn success_response<T: Serialize>(correlation_id: Uuid, result: T, duration_us: u64) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(CalculationEnvelope::new(correlation_id, result, duration_us)),
    )
        .into_response()
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
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
    ApiErrorResponse::bad_request(error).into_response()
}
