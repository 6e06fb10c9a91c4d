//! Core data models for the taxi payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod enriched_shift;
mod payroll_summary;
mod prediction_result;
mod shift_record;

pub use enriched_shift::EnrichedShift;
pub use payroll_summary::PayrollSummary;
pub use prediction_result::{AuditStep, AuditTrace, AuditWarning, PredictionResult, ReportPeriod};
pub use shift_record::{
    MAX_SHIFT_REVENUE, RawShiftRecord, ShiftRecord, parse_time_of_day, validate_shift_batch,
};
