//! Payroll summarization.
//!
//! This module aggregates a batch of enriched shifts and applies the
//! commission table, hourly allowances and deduction rate to produce the
//! predicted payroll.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::PayrollConfig;
use crate::models::{EnrichedShift, PayrollSummary};

use super::commission_tier::lookup_commission_tier;

/// Truncates a non-negative yen amount to whole yen.
///
/// Fractions are always dropped, never rounded.
///
/// # Example
///
/// ```
/// use taxi_payroll::calculation::truncate_to_yen;
/// use rust_decimal::Decimal;
///
/// assert_eq!(truncate_to_yen(Decimal::new(5458935, 2)), 54_589); // 54589.35
/// assert_eq!(truncate_to_yen(Decimal::new(3759, 1)), 375); // 375.9
/// ```
pub fn truncate_to_yen(amount: Decimal) -> u64 {
    amount.trunc().to_u64().unwrap_or(0)
}

/// Summarizes a batch of enriched shifts into a [`PayrollSummary`].
///
/// # Calculation
///
/// 1. Revenue, night hours and overtime hours are summed across the batch
///    (revenue saturates at `u64::MAX` rather than wrapping)
/// 2. Base pay comes from the first commission tier whose threshold is at or
///    below total revenue (zero below the lowest tier)
/// 3. `night_pay = trunc(total_night_hours × night_hourly_allowance)`
/// 4. `overtime_pay = trunc(total_overtime_hours × overtime_hourly_allowance)`
/// 5. `total_pay = base_pay + night_pay + overtime_pay`
/// 6. `deduction = trunc(total_pay × deduction_rate)`
/// 7. `take_home = total_pay − deduction`
///
/// An empty batch produces an all-zero summary.
///
/// # Example
///
/// ```
/// use taxi_payroll::calculation::summarize_payroll;
/// use taxi_payroll::config::PayrollConfig;
///
/// let summary = summarize_payroll(&[], &PayrollConfig::default());
/// assert_eq!(summary.take_home, 0);
/// ```
pub fn summarize_payroll(shifts: &[EnrichedShift], config: &PayrollConfig) -> PayrollSummary {
    let rates = config.rates();

    let total_revenue = shifts
        .iter()
        .fold(0u64, |total, s| total.saturating_add(s.record.revenue));
    let total_night_hours: Decimal = shifts.iter().map(|s| s.night_hours).sum();
    let total_overtime_hours: Decimal = shifts.iter().map(|s| s.overtime_hours).sum();

    let tier = lookup_commission_tier(config.commission_table(), total_revenue);
    let base_pay = tier.map(|t| t.base_pay).unwrap_or(0);

    let night_pay = truncate_to_yen(total_night_hours * rates.night_hourly_allowance);
    let overtime_pay = truncate_to_yen(total_overtime_hours * rates.overtime_hourly_allowance);
    let total_pay = base_pay.saturating_add(night_pay).saturating_add(overtime_pay);

    let deduction = truncate_to_yen(Decimal::from(total_pay) * rates.deduction_rate);
    let take_home = total_pay - deduction;

    PayrollSummary {
        total_revenue,
        total_night_hours,
        total_overtime_hours,
        commission_threshold: tier.map(|t| t.threshold),
        base_pay,
        night_pay,
        overtime_pay,
        total_pay,
        deduction,
        take_home,
    }
}
