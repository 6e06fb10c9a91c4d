//! Commission tier lookup.
//!
//! Base pay is not derived arithmetically from revenue; it is read from a fixed
//! table of revenue thresholds. This module performs that lookup.

use crate::config::{CommissionTable, CommissionTier};

/// Finds the tier reached by `total_revenue`.
///
/// Tiers are scanned from the highest threshold down and the first threshold
/// that is less than or equal to `total_revenue` wins, so a revenue exactly on
/// a threshold reaches that tier. Returns `None` below the lowest threshold.
///
/// # Example
///
/// ```
/// use taxi_payroll::calculation::lookup_commission_tier;
/// use taxi_payroll::config::CommissionTable;
///
/// let table = CommissionTable::default();
/// let tier = lookup_commission_tier(&table, 850_000).unwrap();
/// assert_eq!(tier.base_pay, 471_015);
/// assert!(lookup_commission_tier(&table, 350_000).is_none());
/// ```
pub fn lookup_commission_tier(
    table: &CommissionTable,
    total_revenue: u64,
) -> Option<CommissionTier> {
    table
        .tiers()
        .iter()
        .find(|tier| tier.threshold <= total_revenue)
        .copied()
}

/// Returns the base pay for `total_revenue`, or zero below the lowest tier.
pub fn base_pay_for_revenue(table: &CommissionTable, total_revenue: u64) -> u64 {
    lookup_commission_tier(table, total_revenue)
        .map(|tier| tier.base_pay)
        .unwrap_or(0)
}
