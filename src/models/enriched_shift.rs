//! Enriched shift model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ShiftRecord;

/// A shift record with its derived hour figures.
///
/// All hour values are rounded to two decimal places. On the wire the original
/// record's fields are flattened alongside the derived ones, giving one flat
/// row per shift for tabular display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedShift {
    /// The shift as entered.
    #[serde(flatten)]
    pub record: ShiftRecord,
    /// Elapsed hours between departure and return.
    pub total_hours: Decimal,
    /// Hours falling inside the night window.
    pub night_hours: Decimal,
    /// Hours beyond the standard working day.
    pub overtime_hours: Decimal,
}
