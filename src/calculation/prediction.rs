//! Full payroll prediction.
//!
//! This module runs a whole batch through the engine: every record is
//! enriched, the complete enriched set is summarized, and each rule applied is
//! recorded in an audit trace.

use std::time::Instant;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::config::PayrollConfig;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, EnrichedShift, PayrollSummary, PredictionResult,
    ReportPeriod, ShiftRecord,
};

use super::payroll::summarize_payroll;
use super::shift_enrichment::{enrich_from_window, shift_time_window};

/// Warning code for a shift whose departure and return times are equal.
pub const FULL_DAY_SHIFT_WARNING: &str = "FULL_DAY_SHIFT";

/// Warning code for a non-empty batch that reaches no commission tier.
pub const BELOW_LOWEST_TIER_WARNING: &str = "REVENUE_BELOW_LOWEST_TIER";

/// Predicts the payroll for a batch of shift records.
///
/// The records are owned by the caller and are only read. Summarization runs
/// after every record has been enriched.
///
/// # Audit trace
///
/// Steps are numbered from 1 in this order:
/// - one `shift_time_window` step per shift
/// - `commission_tier_lookup`
/// - `allowance_pay`
/// - `statutory_deduction`
///
/// # Example
///
/// ```
/// use taxi_payroll::calculation::predict_payroll;
/// use taxi_payroll::config::PayrollConfig;
/// use taxi_payroll::models::ShiftRecord;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let records = vec![ShiftRecord {
///     date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
///     revenue: 850_000,
///     departure_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     return_time: NaiveTime::from_hms_opt(3, 30, 0).unwrap(),
/// }];
/// let result = predict_payroll(&records, &PayrollConfig::default());
/// assert_eq!(result.summary.take_home, 420_101);
/// assert_eq!(result.audit_trace.steps.len(), 4);
/// ```
pub fn predict_payroll(records: &[ShiftRecord], config: &PayrollConfig) -> PredictionResult {
    let start_time = Instant::now();
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let mut shifts: Vec<EnrichedShift> = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let (enriched, step) = enrich_with_audit(index, record, config, step_number);
        if record.departure_time == record.return_time {
            warnings.push(AuditWarning {
                code: FULL_DAY_SHIFT_WARNING.to_string(),
                message: format!(
                    "Shift {} on {} has equal departure and return times ({}); treated as 24 hours",
                    index,
                    record.date,
                    record.departure_time.format("%H:%M")
                ),
                severity: "medium".to_string(),
            });
        }
        shifts.push(enriched);
        steps.push(step);
        step_number += 1;
    }

    let summary = summarize_payroll(&shifts, config);

    steps.push(tier_lookup_step(&summary, config, step_number));
    step_number += 1;
    steps.push(allowance_step(&summary, config, step_number));
    step_number += 1;
    steps.push(deduction_step(&summary, config, step_number));

    if !shifts.is_empty() && summary.commission_threshold.is_none() {
        warnings.push(AuditWarning {
            code: BELOW_LOWEST_TIER_WARNING.to_string(),
            message: format!(
                "Total revenue ¥{} is below the lowest commission threshold ¥{}; base pay is zero",
                summary.total_revenue,
                config.commission_table().lowest_threshold()
            ),
            severity: "low".to_string(),
        });
    }

    let period = ReportPeriod::from_dates(records.iter().map(|r| r.date));
    let duration_us = start_time.elapsed().as_micros() as u64;

    debug!(
        shifts_count = shifts.len(),
        total_revenue = summary.total_revenue,
        take_home = summary.take_home,
        warnings = warnings.len(),
        duration_us,
        "Payroll prediction completed"
    );

    PredictionResult {
        prediction_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        period,
        shifts,
        summary,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    }
}

/// Enriches one record and records the time window measurement.
///
/// The window is measured a second time only for the audit instants.
fn enrich_with_audit(
    index: usize,
    record: &ShiftRecord,
    config: &PayrollConfig,
    step_number: u32,
) -> (EnrichedShift, AuditStep) {
    let window = shift_time_window(record, config);
    let enriched = enrich_from_window(record, &window, config);
    let night_window = config.night_window();

    let reasoning = format!(
        "{} to {}{}: {}h total, {}h inside {:02}:00-{:02}:00 ({} method), {}h beyond {}h standard day",
        record.departure_time.format("%H:%M"),
        record.return_time.format("%H:%M"),
        if window.rolled_over() { " next day" } else { "" },
        enriched.total_hours.normalize(),
        enriched.night_hours.normalize(),
        night_window.start_hour,
        night_window.end_hour,
        config.night_hours_method(),
        enriched.overtime_hours.normalize(),
        config.rates().standard_work_hours.normalize()
    );

    let step = AuditStep {
        step_number,
        rule_id: "shift_time_window".to_string(),
        rule_name: "Shift Time Window".to_string(),
        input: serde_json::json!({
            "shift_index": index,
            "date": record.date.to_string(),
            "departure_time": record.departure_time.format("%H:%M").to_string(),
            "return_time": record.return_time.format("%H:%M").to_string(),
            "night_hours_method": config.night_hours_method().to_string()
        }),
        output: serde_json::json!({
            "departure_instant": window.departure_instant.to_string(),
            "return_instant": window.return_instant.to_string(),
            "rolled_over": window.rolled_over(),
            "total_hours": enriched.total_hours.normalize().to_string(),
            "night_hours": enriched.night_hours.normalize().to_string(),
            "overtime_hours": enriched.overtime_hours.normalize().to_string()
        }),
        reasoning,
    };

    (enriched, step)
}

fn tier_lookup_step(
    summary: &PayrollSummary,
    config: &PayrollConfig,
    step_number: u32,
) -> AuditStep {
    let reasoning = match summary.commission_threshold {
        Some(threshold) => format!(
            "Total revenue ¥{} reaches the ¥{} tier: base pay ¥{}",
            summary.total_revenue, threshold, summary.base_pay
        ),
        None => format!(
            "Total revenue ¥{} is below the lowest tier ¥{}: base pay ¥0",
            summary.total_revenue,
            config.commission_table().lowest_threshold()
        ),
    };

    AuditStep {
        step_number,
        rule_id: "commission_tier_lookup".to_string(),
        rule_name: "Commission Tier Lookup".to_string(),
        input: serde_json::json!({
            "total_revenue": summary.total_revenue,
            "tier_count": config.commission_table().tiers().len()
        }),
        output: serde_json::json!({
            "threshold": summary.commission_threshold,
            "base_pay": summary.base_pay
        }),
        reasoning,
    }
}

fn allowance_step(
    summary: &PayrollSummary,
    config: &PayrollConfig,
    step_number: u32,
) -> AuditStep {
    let rates = config.rates();

    AuditStep {
        step_number,
        rule_id: "allowance_pay".to_string(),
        rule_name: "Night and Overtime Allowances".to_string(),
        input: serde_json::json!({
            "total_night_hours": summary.total_night_hours.normalize().to_string(),
            "night_hourly_allowance": rates.night_hourly_allowance.normalize().to_string(),
            "total_overtime_hours": summary.total_overtime_hours.normalize().to_string(),
            "overtime_hourly_allowance": rates.overtime_hourly_allowance.normalize().to_string()
        }),
        output: serde_json::json!({
            "night_pay": summary.night_pay,
            "overtime_pay": summary.overtime_pay
        }),
        reasoning: format!(
            "{}h × ¥{} = ¥{} night pay; {}h × ¥{} = ¥{} overtime pay (fractions truncated)",
            summary.total_night_hours.normalize(),
            rates.night_hourly_allowance.normalize(),
            summary.night_pay,
            summary.total_overtime_hours.normalize(),
            rates.overtime_hourly_allowance.normalize(),
            summary.overtime_pay
        ),
    }
}

fn deduction_step(
    summary: &PayrollSummary,
    config: &PayrollConfig,
    step_number: u32,
) -> AuditStep {
    let rate = config.rates().deduction_rate;

    AuditStep {
        step_number,
        rule_id: "statutory_deduction".to_string(),
        rule_name: "Statutory Deduction".to_string(),
        input: serde_json::json!({
            "total_pay": summary.total_pay,
            "deduction_rate": rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "deduction": summary.deduction,
            "take_home": summary.take_home
        }),
        reasoning: format!(
            "¥{} × {} = ¥{} deducted (truncated), take-home ¥{}",
            summary.total_pay,
            rate.normalize(),
            summary.deduction,
            summary.take_home
        ),
    }
}
