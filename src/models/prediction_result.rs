//! Prediction result models.
//!
//! This module contains the [`PredictionResult`] type and its audit structures,
//! which capture everything a presentation layer needs to render a payroll
//! report: the enriched shifts, the summary, the covered period and a trace of
//! every rule applied.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EnrichedShift, PayrollSummary};

/// The date range covered by a batch of shifts.
///
/// # Example
///
/// ```
/// use taxi_payroll::models::ReportPeriod;
/// use chrono::NaiveDate;
///
/// let dates = [
///     NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
/// ];
/// let period = ReportPeriod::from_dates(dates).unwrap();
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2025, 6, 14).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    /// Earliest shift date (inclusive).
    pub start_date: NaiveDate,
    /// Latest shift date (inclusive).
    pub end_date: NaiveDate,
}

impl ReportPeriod {
    /// Builds the period spanning the given dates, or `None` if there are none.
    pub fn from_dates<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Option<Self> {
        dates.into_iter().fold(None, |period, date| match period {
            None => Some(ReportPeriod {
                start_date: date,
                end_date: date,
            }),
            Some(p) => Some(ReportPeriod {
                start_date: p.start_date.min(date),
                end_date: p.end_date.max(date),
            }),
        })
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during a prediction.
///
/// Warnings flag input that is accepted but probably not what the driver
/// meant, such as a shift with identical departure and return times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a prediction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a payroll prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Unique identifier for this prediction run.
    pub prediction_id: Uuid,
    /// When the prediction was produced.
    pub timestamp: DateTime<Utc>,
    /// The crate version that produced the prediction.
    pub engine_version: String,
    /// The dates covered, or `None` for an empty batch.
    pub period: Option<ReportPeriod>,
    /// The enriched shifts, in input order.
    pub shifts: Vec<EnrichedShift>,
    /// The whole-batch payroll summary.
    pub summary: PayrollSummary,
    /// The audit trace for this prediction.
    pub audit_trace: AuditTrace,
}
