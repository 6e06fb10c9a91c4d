//! CSV reader for shift logs.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{RawShiftRecord, ShiftRecord};

/// Required columns as `(english, japanese)` header pairs.
///
/// Either spelling is accepted for each column.
pub const REQUIRED_COLUMNS: [(&str, &str); 4] = [
    ("date", "日付"),
    ("revenue", "営収"),
    ("departure_time", "出庫時刻"),
    ("return_time", "帰庫時刻"),
];

/// Reads a CSV shift log into validated shift records.
///
/// The first row must be a header naming every column in
/// [`REQUIRED_COLUMNS`], in English or Japanese. Extra columns are ignored,
/// surrounding whitespace is trimmed and blank lines are skipped. Records keep
/// file order.
///
/// # Errors
///
/// Returns [`EngineError::CsvImport`] carrying the 1-based file line for a
/// missing header column, a malformed row, a negative revenue or an invalid
/// time. The first bad row rejects the whole file.
///
/// # Example
///
/// ```
/// use taxi_payroll::import::read_shift_csv;
///
/// let data = "日付,営収,出庫時刻,帰庫時刻\n2025-06-02,58000,17:00,03:30\n";
/// let records = read_shift_csv(data.as_bytes()).unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].revenue, 58_000);
/// ```
pub fn read_shift_csv<R: Read>(reader: R) -> EngineResult<Vec<ShiftRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(|err| csv_error(&err, 1))?.clone();
    check_headers(&headers)?;

    let mut records = Vec::new();
    let mut row = StringRecord::new();
    loop {
        let line_hint = reader.position().line();
        let has_row = reader
            .read_record(&mut row)
            .map_err(|err| csv_error(&err, line_hint))?;
        if !has_row {
            break;
        }

        let line = row.position().map(|p| p.line()).unwrap_or(line_hint);
        let raw: RawShiftRecord = row
            .deserialize(Some(&headers))
            .map_err(|err| csv_error(&err, line))?;
        let record = raw
            .into_record(records.len())
            .map_err(|err| EngineError::CsvImport {
                line,
                message: err.to_string(),
            })?;
        records.push(record);
    }

    debug!(records = records.len(), "Imported shift CSV");
    Ok(records)
}

fn check_headers(headers: &StringRecord) -> EngineResult<()> {
    if headers.iter().all(str::is_empty) {
        return Err(EngineError::CsvImport {
            line: 1,
            message: "missing header row".to_string(),
        });
    }

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|(english, japanese)| !headers.iter().any(|h| h == *english || h == *japanese))
        .map(|(english, _)| *english)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(EngineError::CsvImport {
            line: 1,
            message: format!("missing column(s): {}", missing.join(", ")),
        })
    }
}

/// Converts a `csv` error, preferring the line the crate itself reports.
fn csv_error(err: &csv::Error, fallback_line: u64) -> EngineError {
    let line = err.position().map(|p| p.line()).unwrap_or(fallback_line);
    let message = match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {} fields, found {}", expected_len, len),
        _ => err.to_string(),
    };
    EngineError::CsvImport { line, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn expect_line(result: EngineResult<Vec<ShiftRecord>>) -> (u64, String) {
        match result {
            Err(EngineError::CsvImport { line, message }) => (line, message),
            other => panic!("Expected CsvImport error, got {:?}", other),
        }
    }

    #[test]
    fn test_english_headers() {
        let data = "date,revenue,departure_time,return_time\n\
                    2025-06-02,58000,17:00,03:30\n\
                    2025-06-04,61200,16:30,02:45\n";
        let records = read_shift_csv(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        assert_eq!(records[0].departure_time, time("17:00"));
        assert_eq!(records[1].revenue, 61_200);
        assert_eq!(records[1].return_time, time("02:45"));
    }

    #[test]
    fn test_japanese_headers_and_extra_columns() {
        let data = "日付,営収,出庫時刻,帰庫時刻,備考\n\
                    2025-06-02,58000,17:00,03:30,雨\n";
        let records = read_shift_csv(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].revenue, 58_000);
        assert_eq!(records[0].return_time, time("03:30"));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let data = " date , revenue , departure_time , return_time \n\
                    2025-06-02 ,  58000, 17:00 , 03:30:00 \n";
        let records = read_shift_csv(data.as_bytes()).unwrap();

        assert_eq!(records[0].revenue, 58_000);
        assert_eq!(records[0].return_time, time("03:30"));
    }

    #[test]
    fn test_header_only_file_is_empty_batch() {
        let data = "date,revenue,departure_time,return_time\n";

        assert!(read_shift_csv(data.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let (line, message) = expect_line(read_shift_csv("".as_bytes()));

        assert_eq!(line, 1);
        assert!(message.contains("header"));
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let data = "date,revenue,departure_time\n2025-06-02,58000,17:00\n";
        let (line, message) = expect_line(read_shift_csv(data.as_bytes()));

        assert_eq!(line, 1);
        assert!(message.contains("return_time"));
    }

    #[test]
    fn test_bad_time_reports_line() {
        let data = "date,revenue,departure_time,return_time\n\
                    2025-06-02,58000,17:00,03:30\n\
                    2025-06-03,42000,25:00,03:30\n";
        let (line, message) = expect_line(read_shift_csv(data.as_bytes()));

        assert_eq!(line, 3);
        assert!(message.contains("25:00"));
    }

    #[test]
    fn test_negative_revenue_reports_line() {
        let data = "date,revenue,departure_time,return_time\n\
                    2025-06-02,-100,17:00,03:30\n";
        let (line, message) = expect_line(read_shift_csv(data.as_bytes()));

        assert_eq!(line, 2);
        assert!(message.contains("non-negative"));
    }

    #[test]
    fn test_unparseable_revenue_reports_line() {
        let data = "date,revenue,departure_time,return_time\n\
                    2025-06-02,58000,17:00,03:30\n\
                    2025-06-03,58000,17:00,03:30\n\
                    2025-06-04,lots,17:00,03:30\n";
        let (line, _) = expect_line(read_shift_csv(data.as_bytes()));

        assert_eq!(line, 4);
    }

    #[test]
    fn test_short_row_is_rejected() {
        let data = "date,revenue,departure_time,return_time\n\
                    2025-06-02,58000,17:00\n";
        let (line, _) = expect_line(read_shift_csv(data.as_bytes()));

        assert_eq!(line, 2);
    }
}
