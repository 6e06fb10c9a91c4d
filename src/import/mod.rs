//! Shift import from spreadsheet exports.
//!
//! Drivers keep their shift logs in spreadsheets; this module reads the CSV
//! exports of those sheets into validated [`ShiftRecord`](crate::models::ShiftRecord)s.

mod csv_reader;

pub use csv_reader::{REQUIRED_COLUMNS, read_shift_csv};
