//! Shift record models.
//!
//! This module defines the validated [`ShiftRecord`] consumed by the engine and
//! the [`RawShiftRecord`] received from JSON bodies or CSV files before any
//! validation has happened.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// Largest revenue accepted for a single shift, in yen.
///
/// Keeps batch totals far from `u64` overflow.
pub const MAX_SHIFT_REVENUE: u64 = 100_000_000;

/// One driver shift as entered by the driver.
///
/// Times carry no date; the shift is anchored on `date` and the return time
/// rolls over to the next day when it is not after the departure time.
///
/// # Example
///
/// ```
/// use taxi_payroll::models::ShiftRecord;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let record = ShiftRecord {
///     date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
///     revenue: 58_000,
///     departure_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     return_time: NaiveTime::from_hms_opt(3, 30, 0).unwrap(),
/// };
/// assert!(record.crosses_midnight());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// The calendar date the shift started on.
    pub date: NaiveDate,
    /// Revenue taken during the shift, in whole yen.
    pub revenue: u64,
    /// Clock-out time from the depot.
    #[serde(with = "hhmm")]
    pub departure_time: NaiveTime,
    /// Clock-in time back at the depot.
    #[serde(with = "hhmm")]
    pub return_time: NaiveTime,
}

impl ShiftRecord {
    /// Returns true when the return instant falls on the following day.
    ///
    /// Equal departure and return times count as crossing midnight: the shift
    /// is taken to last a full 24 hours.
    pub fn crosses_midnight(&self) -> bool {
        self.return_time <= self.departure_time
    }
}

/// An unvalidated shift record as supplied by a caller.
///
/// Field aliases accept the column headers used by the drivers' existing
/// spreadsheets (`日付`, `営収`, `出庫時刻`, `帰庫時刻`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawShiftRecord {
    /// The calendar date the shift started on.
    #[serde(alias = "日付")]
    pub date: NaiveDate,
    /// Revenue for the shift; must be non-negative.
    #[serde(alias = "営収")]
    pub revenue: i64,
    /// Departure time as `HH:MM` or `HH:MM:SS`.
    #[serde(alias = "出庫時刻")]
    pub departure_time: String,
    /// Return time as `HH:MM` or `HH:MM:SS`.
    #[serde(alias = "帰庫時刻")]
    pub return_time: String,
}

impl RawShiftRecord {
    /// Validates this record into a [`ShiftRecord`].
    ///
    /// `index` is the record's position in its batch and is carried into the
    /// error so the caller can point at the offending row.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidShift`] if the revenue is negative or above
    ///   [`MAX_SHIFT_REVENUE`], or the date has no neighbouring calendar day
    /// - [`EngineError::InvalidTimeOfDay`] if either time cannot be parsed
    pub fn into_record(self, index: usize) -> EngineResult<ShiftRecord> {
        let revenue = u64::try_from(self.revenue).map_err(|_| EngineError::InvalidShift {
            index,
            message: format!("revenue must be non-negative, got {}", self.revenue),
        })?;
        if revenue > MAX_SHIFT_REVENUE {
            return Err(EngineError::InvalidShift {
                index,
                message: format!(
                    "revenue {} exceeds the per-shift limit of {}",
                    revenue, MAX_SHIFT_REVENUE
                ),
            });
        }
        if self.date.pred_opt().is_none() || self.date.succ_opt().is_none() {
            return Err(EngineError::InvalidShift {
                index,
                message: format!("date {} is outside the supported calendar range", self.date),
            });
        }

        let departure_time = parse_time_of_day(
            &format!("shifts[{index}].departure_time"),
            &self.departure_time,
        )?;
        let return_time =
            parse_time_of_day(&format!("shifts[{index}].return_time"), &self.return_time)?;

        Ok(ShiftRecord {
            date: self.date,
            revenue,
            departure_time,
            return_time,
        })
    }
}

/// Validates a whole batch of raw records.
///
/// The batch is accepted only if every record is valid; the first invalid
/// record rejects the batch.
///
/// # Example
///
/// ```
/// use taxi_payroll::models::{validate_shift_batch, RawShiftRecord};
/// use chrono::NaiveDate;
///
/// let raw = vec![RawShiftRecord {
///     date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
///     revenue: 58_000,
///     departure_time: "17:00".to_string(),
///     return_time: "03:30".to_string(),
/// }];
/// let records = validate_shift_batch(raw).unwrap();
/// assert_eq!(records.len(), 1);
/// ```
pub fn validate_shift_batch(raw: Vec<RawShiftRecord>) -> EngineResult<Vec<ShiftRecord>> {
    raw.into_iter()
        .enumerate()
        .map(|(index, record)| record.into_record(index))
        .collect()
}

/// Parses a 24-hour `HH:MM` or `HH:MM:SS` time of day.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTimeOfDay`] naming `field` when `value` is
/// not a valid time of day.
pub fn parse_time_of_day(field: &str, value: &str) -> EngineResult<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| EngineError::InvalidTimeOfDay {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Serde adapter writing times as `HH:MM` (or `HH:MM:SS` when seconds are set).
mod hhmm {
    use super::*;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        let text = if time.second() == 0 {
            time.format("%H:%M").to_string()
        } else {
            time.format("%H:%M:%S").to_string()
        };
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_time_of_day("time", &text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn raw(revenue: i64, departure: &str, ret: &str) -> RawShiftRecord {
        RawShiftRecord {
            date: make_date("2025-06-02"),
            revenue,
            departure_time: departure.to_string(),
            return_time: ret.to_string(),
        }
    }

    #[test]
    fn test_parse_hh_mm() {
        assert_eq!(
            parse_time_of_day("departure_time", "17:00").unwrap(),
            make_time(17, 0)
        );
        assert_eq!(
            parse_time_of_day("return_time", "03:30").unwrap(),
            make_time(3, 30)
        );
    }

    #[test]
    fn test_parse_hh_mm_ss() {
        assert_eq!(
            parse_time_of_day("departure_time", "09:15:00").unwrap(),
            make_time(9, 15)
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(
            parse_time_of_day("departure_time", " 22:00 ").unwrap(),
            make_time(22, 0)
        );
    }

    #[test]
    fn test_parse_rejects_out_of_range_hour() {
        let result = parse_time_of_day("departure_time", "25:00");
        match result {
            Err(EngineError::InvalidTimeOfDay { field, value }) => {
                assert_eq!(field, "departure_time");
                assert_eq!(value, "25:00");
            }
            other => panic!("Expected InvalidTimeOfDay, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_free_text() {
        assert!(parse_time_of_day("return_time", "late").is_err());
        assert!(parse_time_of_day("return_time", "").is_err());
        assert!(parse_time_of_day("return_time", "12:60").is_err());
    }

    #[test]
    fn test_into_record_valid() {
        let record = raw(58_000, "17:00", "03:30").into_record(0).unwrap();
        assert_eq!(record.revenue, 58_000);
        assert_eq!(record.departure_time, make_time(17, 0));
        assert_eq!(record.return_time, make_time(3, 30));
        assert!(record.crosses_midnight());
    }

    #[test]
    fn test_into_record_rejects_negative_revenue() {
        match raw(-1, "17:00", "03:30").into_record(3) {
            Err(EngineError::InvalidShift { index, message }) => {
                assert_eq!(index, 3);
                assert!(message.contains("non-negative"));
            }
            other => panic!("Expected InvalidShift, got {:?}", other),
        }
    }

    #[test]
    fn test_into_record_rejects_revenue_above_limit() {
        assert!(raw(MAX_SHIFT_REVENUE as i64, "17:00", "03:30").into_record(0).is_ok());

        match raw(i64::MAX, "17:00", "03:30").into_record(2) {
            Err(EngineError::InvalidShift { index, message }) => {
                assert_eq!(index, 2);
                assert!(message.contains("limit"));
            }
            other => panic!("Expected InvalidShift, got {:?}", other),
        }
    }

    #[test]
    fn test_batch_of_huge_revenues_is_rejected() {
        let batch = vec![
            raw(i64::MAX, "09:00", "17:00"),
            raw(i64::MAX, "09:00", "17:00"),
            raw(i64::MAX, "09:00", "17:00"),
        ];
        assert!(matches!(
            validate_shift_batch(batch),
            Err(EngineError::InvalidShift { index: 0, .. })
        ));
    }

    #[test]
    fn test_into_record_rejects_calendar_edge_dates() {
        for date in [NaiveDate::MIN, NaiveDate::MAX] {
            let record = RawShiftRecord {
                date,
                ..raw(1_000, "09:00", "17:00")
            };
            match record.into_record(0) {
                Err(EngineError::InvalidShift { message, .. }) => {
                    assert!(message.contains("calendar range"));
                }
                other => panic!("Expected InvalidShift, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_far_future_date_from_json_is_rejected() {
        let json = serde_json::json!({
            "date": NaiveDate::MAX.to_string(),
            "revenue": 1,
            "departure_time": "09:00",
            "return_time": "17:00"
        });
        let record: RawShiftRecord = serde_json::from_value(json).unwrap();

        assert!(record.into_record(0).is_err());
    }

    #[test]
    fn test_into_record_names_offending_field() {
        match raw(0, "17:00", "27:30").into_record(1) {
            Err(EngineError::InvalidTimeOfDay { field, .. }) => {
                assert_eq!(field, "shifts[1].return_time");
            }
            other => panic!("Expected InvalidTimeOfDay, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_batch_rejects_whole_batch() {
        let batch = vec![
            raw(10_000, "09:00", "17:00"),
            raw(20_000, "xx", "17:00"),
            raw(30_000, "09:00", "17:00"),
        ];
        assert!(validate_shift_batch(batch).is_err());
    }

    #[test]
    fn test_validate_batch_preserves_order() {
        let batch = vec![raw(10_000, "09:00", "17:00"), raw(20_000, "17:00", "03:30")];
        let records = validate_shift_batch(batch).unwrap();
        assert_eq!(records[0].revenue, 10_000);
        assert_eq!(records[1].revenue, 20_000);
    }

    #[test]
    fn test_same_day_shift_does_not_cross_midnight() {
        let record = raw(0, "09:00", "17:00").into_record(0).unwrap();
        assert!(!record.crosses_midnight());
    }

    #[test]
    fn test_equal_times_cross_midnight() {
        let record = raw(0, "08:00", "08:00").into_record(0).unwrap();
        assert!(record.crosses_midnight());
    }

    #[test]
    fn test_shift_record_serializes_times_as_hh_mm() {
        let record = raw(58_000, "17:00", "03:30").into_record(0).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["departure_time"], "17:00");
        assert_eq!(json["return_time"], "03:30");
        assert_eq!(json["date"], "2025-06-02");
        assert_eq!(json["revenue"], 58_000);
    }

    #[test]
    fn test_raw_record_accepts_japanese_headers() {
        let json = r#"{
            "日付": "2025-06-02",
            "営収": 58000,
            "出庫時刻": "17:00",
            "帰庫時刻": "03:30"
        }"#;
        let record: RawShiftRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.revenue, 58_000);
        assert_eq!(record.departure_time, "17:00");
    }
}
