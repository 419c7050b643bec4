//! HTTP request handlers for the Payslip Calculation Engine API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_bulk_payslips, calculate_payslip, validate_calculations};
use crate::error::EngineError;
use crate::models::{BulkSummary, PayslipResult};

use super::request::{
    BulkPayslipRequest, BulkPayslipResponse, CalculatePayslipRequest, ValidateResponse,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payslips/calculate", post(calculate_handler))
        .route("/payslips/bulk", post(bulk_handler))
        .route("/payslips/validate", post(validate_handler))
        .route("/templates/:id", get(template_handler))
        .with_state(state)
}

/// Handler for `POST /payslips/calculate`.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculatePayslipRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let template = match state.templates().get_template(&request.template_id) {
        Ok(template) => template,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                template_id = %request.template_id,
                "Template not found"
            );
            return error_response(err.into());
        }
    };

    let start_time = Instant::now();
    let payslip = calculate_payslip(
        &request.employee,
        &request.payroll_input,
        request.salary_structure.as_ref(),
        template,
    );

    info!(
        correlation_id = %correlation_id,
        employee_id = %payslip.employee_id,
        template_id = %template.metadata.id,
        net_salary = %payslip.net_salary,
        duration_us = start_time.elapsed().as_micros(),
        "Payslip calculated"
    );
    json_response(StatusCode::OK, payslip)
}

/// Handler for `POST /payslips/bulk`.
async fn bulk_handler(
    State(state): State<AppState>,
    payload: Result<Json<BulkPayslipRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing bulk payslip request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let template = match state.templates().get_template(&request.template_id) {
        Ok(template) => template,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                template_id = %request.template_id,
                "Template not found"
            );
            return error_response(err.into());
        }
    };

    let start_time = Instant::now();
    let outcomes = calculate_bulk_payslips(
        &request.employees,
        &request.payroll_inputs,
        &request.salary_structures,
        template,
    );
    let summary = BulkSummary::from_outcomes(&outcomes);

    info!(
        correlation_id = %correlation_id,
        template_id = %template.metadata.id,
        total = summary.total,
        failed = summary.failed,
        duration_us = start_time.elapsed().as_micros(),
        "Bulk payslip run completed"
    );
    json_response(StatusCode::OK, BulkPayslipResponse { outcomes, summary })
}

/// Handler for `POST /payslips/validate`.
async fn validate_handler(payload: Result<Json<PayslipResult>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();

    let payslip = match payload {
        Ok(Json(payslip)) => payslip,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let violations = validate_calculations(&payslip);
    info!(
        correlation_id = %correlation_id,
        employee_id = %payslip.employee_id,
        violations = violations.len(),
        "Payslip validated"
    );
    json_response(StatusCode::OK, ValidateResponse::from(violations))
}

/// Handler for `GET /templates/:id`.
async fn template_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.templates().get_template(&id) {
        Ok(template) => json_response(StatusCode::OK, template),
        Err(EngineError::TemplateNotFound { id }) => {
            warn!(template_id = %id, "Template not found");
            error_response(ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::template_not_found(&id),
            })
        }
        Err(err) => {
            warn!(template_id = %id, error = %err, "Template lookup failed");
            error_response(err.into())
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

/// Maps a body extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
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
    json_response(StatusCode::BAD_REQUEST, error)
}
