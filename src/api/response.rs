//! Response types for the payroll API.
//!
//! This module defines the error body returned by every endpoint and the
//! mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::config::{
    CommissionTier, NightHoursMethod, NightWindow, PayrollConfig, PayrollRates, RateSheetMetadata,
};
use crate::error::EngineError;

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
    /// Wraps an error body in a `400 Bad Request`.
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
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::InvalidTimeOfDay { field, .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_TIME_OF_DAY",
                    message,
                    format!("'{}' must be a 24-hour time such as 17:00 or 03:30", field),
                ),
            ),
            EngineError::InvalidShift { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_SHIFT",
                    message,
                    "The shift data contains invalid information",
                ),
            ),
            EngineError::CsvImport { .. } => ApiErrorResponse::bad_request(ApiError::with_details(
                "CSV_IMPORT_ERROR",
                message,
                "Expected a header row of date, revenue, departure_time, return_time",
            )),
        }
    }
}

/// Response body for `GET /commission-tiers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionTiersResponse {
    /// The rate sheet the tiers come from.
    pub metadata: RateSheetMetadata,
    /// Tiers ordered from the highest threshold down.
    pub tiers: Vec<CommissionTier>,
    /// Hourly allowances, deduction rate and standard day.
    pub rates: PayrollRates,
    /// The window counted as night work.
    pub night_window: NightWindow,
    /// How night hours are measured.
    pub night_hours_method: NightHoursMethod,
}

impl From<&PayrollConfig> for CommissionTiersResponse {
    fn from(config: &PayrollConfig) -> Self {
        Self {
            metadata: config.metadata().clone(),
            tiers: config.commission_table().tiers().to_vec(),
            rates: config.rates().clone(),
            night_window: *config.night_window(),
            night_hours_method: config.night_hours_method(),
        }
    }
}
