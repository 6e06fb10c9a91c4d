//! Shift enrichment.
//!
//! This module turns a [`ShiftRecord`] into an [`EnrichedShift`] by measuring
//! its time window and splitting off the hours worked beyond the standard day.

use rust_decimal::Decimal;

use crate::config::PayrollConfig;
use crate::models::{EnrichedShift, ShiftRecord};

use super::time_window::{HOURS_DECIMAL_PLACES, TimeWindow, compute_time_window};

/// Standard working day in hours under the built-in rate sheet.
pub const STANDARD_WORK_HOURS: Decimal = Decimal::from_parts(9, 0, 0, false, 0);

/// Computes overtime hours as the excess over `standard_work_hours`.
///
/// Never negative; rounded to two decimal places.
///
/// # Example
///
/// ```
/// use taxi_payroll::calculation::{overtime_hours, STANDARD_WORK_HOURS};
/// use rust_decimal::Decimal;
///
/// assert_eq!(overtime_hours(Decimal::new(105, 1), STANDARD_WORK_HOURS), Decimal::new(15, 1));
/// assert_eq!(overtime_hours(Decimal::new(8, 0), STANDARD_WORK_HOURS), Decimal::ZERO);
/// ```
pub fn overtime_hours(total_hours: Decimal, standard_work_hours: Decimal) -> Decimal {
    (total_hours - standard_work_hours)
        .max(Decimal::ZERO)
        .round_dp(HOURS_DECIMAL_PLACES)
}

/// Enriches one shift record with its total, night and overtime hours.
///
/// Pure: the record is not modified and the same input always yields the same
/// output.
///
/// # Example
///
/// ```
/// use taxi_payroll::calculation::enrich_shift;
/// use taxi_payroll::config::PayrollConfig;
/// use taxi_payroll::models::ShiftRecord;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let record = ShiftRecord {
///     date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
///     revenue: 58_000,
///     departure_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     return_time: NaiveTime::from_hms_opt(3, 30, 0).unwrap(),
/// };
/// let enriched = enrich_shift(&record, &PayrollConfig::default());
/// assert_eq!(enriched.night_hours, Decimal::new(55, 1));
/// assert_eq!(enriched.overtime_hours, Decimal::new(15, 1));
/// ```
pub fn enrich_shift(record: &ShiftRecord, config: &PayrollConfig) -> EnrichedShift {
    enrich_from_window(record, &shift_time_window(record, config), config)
}

/// Anchors and measures a record's shift under `config`.
pub(crate) fn shift_time_window(record: &ShiftRecord, config: &PayrollConfig) -> TimeWindow {
    compute_time_window(
        record.departure_time,
        record.return_time,
        record.date,
        config.night_window(),
        config.night_hours_method(),
    )
}

/// Builds the enriched shift from a window already computed for `record`.
pub(crate) fn enrich_from_window(
    record: &ShiftRecord,
    window: &TimeWindow,
    config: &PayrollConfig,
) -> EnrichedShift {
    EnrichedShift {
        record: record.clone(),
        total_hours: window.total_hours,
        night_hours: window.night_hours.round_dp(HOURS_DECIMAL_PLACES),
        overtime_hours: overtime_hours(window.total_hours, config.rates().standard_work_hours),
    }
}

/// Enriches every record of a batch, preserving input order.
pub fn enrich_shifts(records: &[ShiftRecord], config: &PayrollConfig) -> Vec<EnrichedShift> {
    records
        .iter()
        .map(|record| enrich_shift(record, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NightHoursMethod;
    use chrono::{NaiveDate, NaiveTime};
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(revenue: u64, departure: &str, ret: &str) -> ShiftRecord {
        ShiftRecord {
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            revenue,
            departure_time: NaiveTime::parse_from_str(departure, "%H:%M").unwrap(),
            return_time: NaiveTime::parse_from_str(ret, "%H:%M").unwrap(),
        }
    }

    #[test]
    fn test_night_shift_with_overtime() {
        let enriched = enrich_shift(&record(58_000, "17:00", "03:30"), &PayrollConfig::default());

        assert_eq!(enriched.total_hours, dec("10.5"));
        assert_eq!(enriched.night_hours, dec("5.5"));
        assert_eq!(enriched.overtime_hours, dec("1.5"));
        assert_eq!(enriched.record.revenue, 58_000);
    }

    #[test]
    fn test_day_shift_without_overtime() {
        let enriched = enrich_shift(&record(30_000, "09:00", "17:00"), &PayrollConfig::default());

        assert_eq!(enriched.total_hours, dec("8"));
        assert_eq!(enriched.night_hours, Decimal::ZERO);
        assert_eq!(enriched.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_exactly_standard_day_has_no_overtime() {
        let enriched = enrich_shift(&record(30_000, "08:00", "17:00"), &PayrollConfig::default());

        assert_eq!(enriched.total_hours, dec("9"));
        assert_eq!(enriched.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_full_day_shift_overtime() {
        let enriched = enrich_shift(&record(0, "06:00", "06:00"), &PayrollConfig::default());

        assert_eq!(enriched.total_hours, dec("24"));
        assert_eq!(enriched.overtime_hours, dec("15"));
    }

    #[test]
    fn test_method_is_taken_from_config() {
        let shift = record(0, "21:45", "23:00");
        let exact = enrich_shift(&shift, &PayrollConfig::default());
        let quantized = enrich_shift(
            &shift,
            &PayrollConfig::default().with_night_hours_method(NightHoursMethod::Quantized),
        );

        assert_eq!(exact.night_hours, dec("1"));
        assert_eq!(quantized.night_hours, dec("0.75"));
    }

    #[test]
    fn test_enrich_is_idempotent() {
        let config = PayrollConfig::default();
        let shift = record(41_500, "16:20", "02:05");

        assert_eq!(enrich_shift(&shift, &config), enrich_shift(&shift, &config));
    }

    #[test]
    fn test_enrich_from_window_uses_given_window() {
        let config = PayrollConfig::default();
        let shift = record(41_500, "22:10", "05:20");
        let window = shift_time_window(&shift, &config);
        let enriched = enrich_from_window(&shift, &window, &config);

        assert_eq!(enriched, enrich_shift(&shift, &config));
        assert_eq!(enriched.total_hours, window.total_hours);
        assert_eq!(enriched.night_hours, window.night_hours.round_dp(2));
    }

    #[test]
    fn test_enrich_shifts_preserves_order() {
        let records = vec![
            record(1, "09:00", "17:00"),
            record(2, "17:00", "03:30"),
            record(3, "22:00", "07:00"),
        ];
        let enriched = enrich_shifts(&records, &PayrollConfig::default());

        let revenues: Vec<u64> = enriched.iter().map(|e| e.record.revenue).collect();
        assert_eq!(revenues, vec![1, 2, 3]);
    }

    #[test]
    fn test_enrich_shifts_empty() {
        assert!(enrich_shifts(&[], &PayrollConfig::default()).is_empty());
    }

    #[test]
    fn test_overtime_hours_never_negative() {
        assert_eq!(overtime_hours(dec("0"), STANDARD_WORK_HOURS), Decimal::ZERO);
        assert_eq!(overtime_hours(dec("8.99"), STANDARD_WORK_HOURS), Decimal::ZERO);
        assert_eq!(overtime_hours(dec("9.01"), STANDARD_WORK_HOURS), dec("0.01"));
    }

    proptest! {
        #[test]
        fn prop_overtime_is_excess_over_nine_hours(dep in 0u32..1440, ret in 0u32..1440) {
            let shift = ShiftRecord {
                date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
                revenue: 0,
                departure_time: NaiveTime::from_hms_opt(dep / 60, dep % 60, 0).unwrap(),
                return_time: NaiveTime::from_hms_opt(ret / 60, ret % 60, 0).unwrap(),
            };
            let enriched = enrich_shift(&shift, &PayrollConfig::default());

            let expected = (enriched.total_hours - dec("9")).max(Decimal::ZERO);
            prop_assert_eq!(enriched.overtime_hours, expected);
            prop_assert!(enriched.night_hours <= enriched.total_hours);
        }
    }
}
