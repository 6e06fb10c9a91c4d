//! Shift time window calculation.
//!
//! This module anchors a departure/return pair of clock times on a calendar
//! date, rolls the return over midnight when needed, and measures the total
//! elapsed hours and the hours that fall inside the nightly window.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{NightHoursMethod, NightWindow};

/// Number of decimal places hour figures are rounded to.
pub const HOURS_DECIMAL_PLACES: u32 = 2;

/// The measured time window of one shift.
///
/// # Example
///
/// ```
/// use taxi_payroll::calculation::compute_time_window;
/// use taxi_payroll::config::{NightHoursMethod, NightWindow};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let window = compute_time_window(
///     NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(3, 30, 0).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
///     &NightWindow::default(),
///     NightHoursMethod::Exact,
/// );
/// assert_eq!(window.total_hours, Decimal::new(105, 1)); // 10.5
/// assert_eq!(window.night_hours, Decimal::new(55, 1)); // 5.5
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Departure anchored on the shift date.
    pub departure_instant: NaiveDateTime,
    /// Return, advanced one day when it is not after the departure.
    pub return_instant: NaiveDateTime,
    /// Elapsed hours, rounded to two decimal places.
    pub total_hours: Decimal,
    /// Hours inside the night window, rounded to two decimal places.
    pub night_hours: Decimal,
}

impl TimeWindow {
    /// Returns true when the return instant was rolled over to the next day.
    pub fn rolled_over(&self) -> bool {
        self.return_instant.date() > self.departure_instant.date()
    }
}

/// Computes the total and night hours of a shift.
///
/// The departure is anchored at `reference_date + departure`. The return is
/// anchored on the same date and advanced by exactly one day when it is at or
/// before the departure, so identical times give a 24-hour shift.
///
/// # Arguments
///
/// * `departure` - Clock-out time
/// * `return_time` - Clock-in time
/// * `reference_date` - Calendar date the shift started on
/// * `night_window` - The nightly window in which night hours accrue
/// * `method` - How overlap with the night window is measured
///
/// # Night hour methods
///
/// - [`NightHoursMethod::Exact`]: exact intersection of the shift with every
///   occurrence of the night window it touches
/// - [`NightHoursMethod::Quantized`]: the shift is cut into steps of
///   `night_window.scan_step_minutes` starting at the departure (the last one
///   clipped to the return); a step counts in full when the clock hour at its
///   start is inside the window
pub fn compute_time_window(
    departure: NaiveTime,
    return_time: NaiveTime,
    reference_date: NaiveDate,
    night_window: &NightWindow,
    method: NightHoursMethod,
) -> TimeWindow {
    let departure_instant = reference_date.and_time(departure);
    let mut return_instant = reference_date.and_time(return_time);
    if return_instant <= departure_instant {
        return_instant = reference_date
            .succ_opt()
            .map_or(NaiveDateTime::MAX, |next_day| next_day.and_time(return_time));
    }

    let total_seconds = (return_instant - departure_instant).num_seconds();
    let night_seconds = match method {
        NightHoursMethod::Exact => {
            exact_night_seconds(departure_instant, return_instant, night_window)
        }
        NightHoursMethod::Quantized => {
            quantized_night_seconds(departure_instant, return_instant, night_window)
        }
    };

    TimeWindow {
        departure_instant,
        return_instant,
        total_hours: seconds_to_hours(total_seconds),
        night_hours: seconds_to_hours(night_seconds),
    }
}

/// Converts seconds to hours rounded to two decimal places.
fn seconds_to_hours(seconds: i64) -> Decimal {
    (Decimal::new(seconds, 0) / Decimal::new(3600, 0)).round_dp(HOURS_DECIMAL_PLACES)
}

/// Sums the exact overlap of `[start, end)` with each nightly occurrence.
///
/// Occurrences open at `start_hour` on every day from the day before `start`
/// (whose window may spill past midnight into the shift) until one opens at or
/// after `end`. Instants beyond the calendar range clamp to its bounds.
fn exact_night_seconds(start: NaiveDateTime, end: NaiveDateTime, window: &NightWindow) -> i64 {
    let anchor = start.date().and_time(NaiveTime::MIN);
    let open_hours =
        (i64::from(window.end_hour) - i64::from(window.start_hour)).rem_euclid(HOURS_PER_DAY);
    let mut night_seconds = 0;
    let mut opening_offset = i64::from(window.start_hour) - HOURS_PER_DAY;

    loop {
        let window_start = offset_clamped(anchor, opening_offset);
        if window_start >= end {
            break;
        }
        let window_end = offset_clamped(anchor, opening_offset + open_hours);

        let overlap_start = start.max(window_start);
        let overlap_end = end.min(window_end);
        if overlap_end > overlap_start {
            night_seconds += (overlap_end - overlap_start).num_seconds();
        }

        opening_offset += HOURS_PER_DAY;
    }

    night_seconds
}

const HOURS_PER_DAY: i64 = 24;

/// Moves `anchor` by `hours`, saturating at the representable bounds.
fn offset_clamped(anchor: NaiveDateTime, hours: i64) -> NaiveDateTime {
    Duration::try_hours(hours)
        .and_then(|delta| anchor.checked_add_signed(delta))
        .unwrap_or(if hours < 0 {
            NaiveDateTime::MIN
        } else {
            NaiveDateTime::MAX
        })
}

/// Sums fixed-step slices whose starting clock hour is inside the window.
///
/// A step that cannot be represented as a positive duration counts nothing;
/// loaded configurations never carry one.
fn quantized_night_seconds(start: NaiveDateTime, end: NaiveDateTime, window: &NightWindow) -> i64 {
    let Some(step) = Duration::try_minutes(window.scan_step_minutes)
        .filter(|step| *step > Duration::zero())
    else {
        return 0;
    };
    let mut night_seconds = 0;
    let mut current = start;

    while current < end {
        let next = current
            .checked_add_signed(step)
            .map_or(end, |next| next.min(end));
        if window.contains_hour(current.hour()) {
            night_seconds += (next - current).num_seconds();
        }
        current = next;
    }

    night_seconds
}
