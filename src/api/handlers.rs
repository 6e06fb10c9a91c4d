//! HTTP request handlers for the payroll API.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::predict_payroll;
use crate::error::EngineResult;
use crate::import::read_shift_csv;
use crate::models::ShiftRecord;

use super::request::PredictionRequest;
use super::response::{ApiError, ApiErrorResponse, CommissionTiersResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(predict_handler))
        .route("/predict/csv", post(predict_csv_handler))
        .route("/commission-tiers", get(commission_tiers_handler))
        .with_state(state)
}

/// Handler for `POST /predict`.
async fn predict_handler(
    State(state): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing prediction request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = json_rejection_error(&correlation_id, rejection);
            return error_response(ApiErrorResponse::bad_request(error));
        }
    };

    respond_with_prediction(&state, correlation_id, request.into_records())
}

/// Handler for `POST /predict/csv`.
///
/// The body is a CSV shift log with a header row.
async fn predict_csv_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        bytes = body.len(),
        "Processing CSV prediction request"
    );

    respond_with_prediction(&state, correlation_id, read_shift_csv(body.as_ref()))
}

/// Handler for `GET /commission-tiers`.
async fn commission_tiers_handler(State(state): State<AppState>) -> Json<CommissionTiersResponse> {
    Json(CommissionTiersResponse::from(state.payroll_config()))
}

fn respond_with_prediction(
    state: &AppState,
    correlation_id: Uuid,
    records: EngineResult<Vec<ShiftRecord>>,
) -> Response {
    let records = match records {
        Ok(records) => records,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Shift validation failed"
            );
            return error_response(err.into());
        }
    };

    let result = predict_payroll(&records, state.payroll_config());
    info!(
        correlation_id = %correlation_id,
        prediction_id = %result.prediction_id,
        shifts_count = records.len(),
        take_home = result.summary.take_home,
        warnings = result.audit_trace.warnings.len(),
        duration_us = result.audit_trace.duration_us,
        "Prediction completed successfully"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(result),
    )
        .into_response()
}

fn json_rejection_error(correlation_id: &Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::validation_error(body_text)
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
    }
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}
