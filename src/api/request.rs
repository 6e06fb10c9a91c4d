//! Request types for the payroll API.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{RawShiftRecord, ShiftRecord, validate_shift_batch};

/// Request body for `POST /predict`.
///
/// ```json
/// { "shifts": [{ "date": "2025-06-02", "revenue": 58000,
///                "departure_time": "17:00", "return_time": "03:30" }] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// The shifts to predict payroll for, in any order.
    pub shifts: Vec<RawShiftRecord>,
}

impl PredictionRequest {
    /// Validates every shift, rejecting the request on the first bad one.
    pub fn into_records(self) -> EngineResult<Vec<ShiftRecord>> {
        validate_shift_batch(self.shifts)
    }
}
