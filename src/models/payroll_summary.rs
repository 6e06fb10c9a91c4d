//! Payroll summary model.
//!
//! The [`PayrollSummary`] is the whole-batch result: revenue and hour totals,
//! the pay components derived from them, and the predicted take-home amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The predicted payroll for one batch of shifts.
///
/// Currency amounts are whole yen. The pay components always satisfy
/// `total_pay = base_pay + night_pay + overtime_pay` and
/// `take_home = total_pay - deduction`.
///
/// # Example
///
/// ```
/// use taxi_payroll::models::PayrollSummary;
///
/// let summary = PayrollSummary::default();
/// assert_eq!(summary.total_pay, 0);
/// assert_eq!(summary.take_home, 0);
/// assert!(summary.commission_threshold.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// Sum of shift revenue.
    pub total_revenue: u64,
    /// Sum of per-shift night hours.
    pub total_night_hours: Decimal,
    /// Sum of per-shift overtime hours.
    pub total_overtime_hours: Decimal,
    /// Revenue threshold of the matched commission tier, if any.
    pub commission_threshold: Option<u64>,
    /// Commission base pay from the tier table.
    pub base_pay: u64,
    /// Night differential allowance.
    pub night_pay: u64,
    /// Overtime allowance.
    pub overtime_pay: u64,
    /// Gross pay before deductions.
    pub total_pay: u64,
    /// Estimated statutory deductions.
    pub deduction: u64,
    /// Predicted net pay.
    pub take_home: u64,
}

impl PayrollSummary {
    /// Returns true when the pay components are internally consistent.
    pub fn is_balanced(&self) -> bool {
        self.total_pay == self.base_pay + self.night_pay + self.overtime_pay
            && self.take_home + self.deduction == self.total_pay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_summary_is_all_zero() {
        let summary = PayrollSummary::default();
        assert_eq!(summary.total_revenue, 0);
        assert_eq!(summary.total_night_hours, Decimal::ZERO);
        assert_eq!(summary.total_overtime_hours, Decimal::ZERO);
        assert_eq!(summary.base_pay, 0);
        assert_eq!(summary.deduction, 0);
        assert!(summary.is_balanced());
    }

    #[test]
    fn test_unbalanced_summary_detected() {
        let summary = PayrollSummary {
            base_pay: 100,
            total_pay: 99,
            ..Default::default()
        };
        assert!(!summary.is_balanced());
    }

    #[test]
    fn test_summary_serialization() {
        let summary = PayrollSummary {
            total_revenue: 850_000,
            commission_threshold: Some(850_000),
            base_pay: 471_015,
            total_pay: 471_015,
            take_home: 471_015,
            ..Default::default()
        };
        let json = serde_json::to_string(&summary).unwrap();
        let deserialized: PayrollSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, deserialized);
        assert!(json.contains("\"commission_threshold\":850000"));
    }
}
