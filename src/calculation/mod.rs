//! Calculation logic for the payroll prediction engine.
//!
//! The pipeline runs in three stages: a shift's time window is measured
//! (total and night hours, crossing midnight when needed), each shift is
//! enriched with its overtime hours, and the enriched batch is summarized into
//! base pay, allowances, deduction and take-home pay.

mod commission_tier;
mod payroll;
mod prediction;
mod shift_enrichment;
mod time_window;

pub use commission_tier::{base_pay_for_revenue, lookup_commission_tier};
pub use payroll::{summarize_payroll, truncate_to_yen};
pub use prediction::{BELOW_LOWEST_TIER_WARNING, FULL_DAY_SHIFT_WARNING, predict_payroll};
pub use shift_enrichment::{STANDARD_WORK_HOURS, enrich_shift, enrich_shifts, overtime_hours};
pub use time_window::{HOURS_DECIMAL_PLACES, TimeWindow, compute_time_window};
