//! Configuration types for payroll prediction.
//!
//! This module contains the strongly-typed configuration structures that are
//! deserialized from YAML files, plus the built-in defaults that reproduce the
//! company's published rate sheet.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata about the rate sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSheetMetadata {
    /// Human-readable name of the rate sheet.
    pub name: String,
    /// Version or effective date of the rate sheet.
    pub version: String,
    /// ISO currency code of every amount.
    pub currency: String,
}

impl Default for RateSheetMetadata {
    fn default() -> Self {
        Self {
            name: "Taxi driver commission payroll".to_string(),
            version: "builtin".to_string(),
            currency: "JPY".to_string(),
        }
    }
}

/// Hourly allowances and statutory rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRates {
    /// Yen paid per night hour.
    pub night_hourly_allowance: Decimal,
    /// Yen paid per overtime hour.
    pub overtime_hourly_allowance: Decimal,
    /// Fraction of total pay withheld as deductions.
    pub deduction_rate: Decimal,
    /// Hours in a standard working day; anything beyond is overtime.
    pub standard_work_hours: Decimal,
}

impl Default for PayrollRates {
    fn default() -> Self {
        Self {
            night_hourly_allowance: Decimal::new(600, 0),
            overtime_hourly_allowance: Decimal::new(250, 0),
            deduction_rate: Decimal::new(115, 3),
            standard_work_hours: Decimal::new(9, 0),
        }
    }
}

/// The nightly window in which night hours accrue.
///
/// When `start_hour > end_hour` the window wraps past midnight, so the default
/// `22..5` covers `[22:00, 24:00) ∪ [00:00, 05:00)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightWindow {
    /// First clock hour inside the window (0-23).
    pub start_hour: u32,
    /// First clock hour after the window (0-23).
    pub end_hour: u32,
    /// Sub-interval length used by the quantized scan.
    #[serde(default = "default_scan_step_minutes")]
    pub scan_step_minutes: i64,
}

/// Longest accepted quantized scan step: one day.
pub const MAX_SCAN_STEP_MINUTES: i64 = 24 * 60;

fn default_scan_step_minutes() -> i64 {
    30
}

impl Default for NightWindow {
    fn default() -> Self {
        Self {
            start_hour: 22,
            end_hour: 5,
            scan_step_minutes: default_scan_step_minutes(),
        }
    }
}

impl NightWindow {
    /// Returns true when the window wraps past midnight.
    pub fn wraps_midnight(&self) -> bool {
        self.start_hour > self.end_hour
    }

    /// Returns true when clock hour `hour` lies inside the window.
    ///
    /// # Example
    ///
    /// ```
    /// use taxi_payroll::config::NightWindow;
    ///
    /// let window = NightWindow::default();
    /// assert!(window.contains_hour(22));
    /// assert!(window.contains_hour(4));
    /// assert!(!window.contains_hour(5));
    /// assert!(!window.contains_hour(21));
    /// ```
    pub fn contains_hour(&self, hour: u32) -> bool {
        if self.wraps_midnight() {
            hour >= self.start_hour || hour < self.end_hour
        } else {
            hour >= self.start_hour && hour < self.end_hour
        }
    }
}

/// How night hours are measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NightHoursMethod {
    /// Exact overlap between the shift and every night window it touches.
    #[default]
    Exact,
    /// Fixed-step scan from the departure instant, classifying each step by
    /// the clock hour at which it starts. Matches historical reports.
    Quantized,
}

impl std::fmt::Display for NightHoursMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NightHoursMethod::Exact => write!(f, "exact"),
            NightHoursMethod::Quantized => write!(f, "quantized"),
        }
    }
}

/// One row of the commission table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionTier {
    /// Minimum total revenue (inclusive) for this tier.
    pub threshold: u64,
    /// Base pay awarded when this is the highest tier reached.
    pub base_pay: u64,
}

/// The built-in commission table, highest threshold first.
pub const DEFAULT_COMMISSION_TIERS: [CommissionTier; 11] = [
    CommissionTier {
        threshold: 900_000,
        base_pay: 508_712,
    },
    CommissionTier {
        threshold: 850_000,
        base_pay: 471_015,
    },
    CommissionTier {
        threshold: 800_000,
        base_pay: 438_359,
    },
    CommissionTier {
        threshold: 750_000,
        base_pay: 404_286,
    },
    CommissionTier {
        threshold: 700_000,
        base_pay: 369_718,
    },
    CommissionTier {
        threshold: 650_000,
        base_pay: 329_678,
    },
    CommissionTier {
        threshold: 600_000,
        base_pay: 288_907,
    },
    CommissionTier {
        threshold: 550_000,
        base_pay: 252_054,
    },
    CommissionTier {
        threshold: 500_000,
        base_pay: 211_921,
    },
    CommissionTier {
        threshold: 450_000,
        base_pay: 170_255,
    },
    CommissionTier {
        threshold: 400_000,
        base_pay: 122_505,
    },
];

/// An ordered, immutable commission table.
///
/// Tiers are held with strictly decreasing thresholds regardless of the order
/// they were supplied in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CommissionTable {
    tiers: Vec<CommissionTier>,
}

impl CommissionTable {
    /// Builds a table from tiers in any order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the table is empty or two
    /// tiers share a threshold.
    ///
    /// # Example
    ///
    /// ```
    /// use taxi_payroll::config::{CommissionTable, CommissionTier};
    ///
    /// let table = CommissionTable::new(vec![
    ///     CommissionTier { threshold: 400_000, base_pay: 122_505 },
    ///     CommissionTier { threshold: 450_000, base_pay: 170_255 },
    /// ])
    /// .unwrap();
    /// assert_eq!(table.tiers()[0].threshold, 450_000);
    /// ```
    pub fn new(mut tiers: Vec<CommissionTier>) -> EngineResult<Self> {
        if tiers.is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "commission table must contain at least one tier".to_string(),
            });
        }

        tiers.sort_by(|a, b| b.threshold.cmp(&a.threshold));

        if let Some(pair) = tiers.windows(2).find(|w| w[0].threshold == w[1].threshold) {
            return Err(EngineError::InvalidConfig {
                message: format!("duplicate commission threshold {}", pair[0].threshold),
            });
        }

        Ok(Self { tiers })
    }

    /// Returns the tiers, highest threshold first.
    pub fn tiers(&self) -> &[CommissionTier] {
        &self.tiers
    }

    /// Returns the lowest threshold in the table.
    pub fn lowest_threshold(&self) -> u64 {
        self.tiers.last().map(|t| t.threshold).unwrap_or(0)
    }
}

impl Default for CommissionTable {
    fn default() -> Self {
        Self {
            tiers: DEFAULT_COMMISSION_TIERS.to_vec(),
        }
    }
}

/// Structure of `payroll.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollRulesFile {
    /// Rate sheet metadata.
    pub metadata: RateSheetMetadata,
    /// Allowances and statutory rates.
    pub rates: PayrollRates,
    /// Night window definition.
    pub night_window: NightWindow,
    /// Night hour measurement method.
    #[serde(default)]
    pub night_hours_method: NightHoursMethod,
}

/// Structure of `commission_tiers.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommissionTiersFile {
    /// The commission tiers, in any order.
    pub tiers: Vec<CommissionTier>,
}

/// The complete configuration used by every calculation.
///
/// `PayrollConfig::default()` reproduces the published rate sheet, so the
/// engine can be used without any configuration files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PayrollConfig {
    metadata: RateSheetMetadata,
    rates: PayrollRates,
    night_window: NightWindow,
    night_hours_method: NightHoursMethod,
    commission_table: CommissionTable,
}

impl PayrollConfig {
    /// Creates a validated configuration from its component parts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] when a rate is negative, the
    /// deduction rate lies outside `[0, 1]`, the night window hours are out of
    /// range or equal, or the scan step is not positive.
    pub fn new(
        metadata: RateSheetMetadata,
        rates: PayrollRates,
        night_window: NightWindow,
        night_hours_method: NightHoursMethod,
        commission_table: CommissionTable,
    ) -> EngineResult<Self> {
        let invalid = |message: String| Err(EngineError::InvalidConfig { message });

        if rates.night_hourly_allowance < Decimal::ZERO {
            return invalid("night_hourly_allowance must be non-negative".to_string());
        }
        if rates.overtime_hourly_allowance < Decimal::ZERO {
            return invalid("overtime_hourly_allowance must be non-negative".to_string());
        }
        if rates.deduction_rate < Decimal::ZERO || rates.deduction_rate > Decimal::ONE {
            return invalid(format!(
                "deduction_rate must be between 0 and 1, got {}",
                rates.deduction_rate
            ));
        }
        if rates.standard_work_hours < Decimal::ZERO {
            return invalid("standard_work_hours must be non-negative".to_string());
        }
        if night_window.start_hour > 23 || night_window.end_hour > 23 {
            return invalid(format!(
                "night window hours must be 0-23, got {}..{}",
                night_window.start_hour, night_window.end_hour
            ));
        }
        if night_window.start_hour == night_window.end_hour {
            return invalid("night window start and end hours must differ".to_string());
        }
        if night_window.scan_step_minutes <= 0
            || night_window.scan_step_minutes > MAX_SCAN_STEP_MINUTES
        {
            return invalid(format!(
                "scan_step_minutes must be between 1 and {}, got {}",
                MAX_SCAN_STEP_MINUTES, night_window.scan_step_minutes
            ));
        }

        Ok(Self {
            metadata,
            rates,
            night_window,
            night_hours_method,
            commission_table,
        })
    }

    /// Returns a copy of this configuration using another night hour method.
    pub fn with_night_hours_method(mut self, method: NightHoursMethod) -> Self {
        self.night_hours_method = method;
        self
    }

    /// Returns the rate sheet metadata.
    pub fn metadata(&self) -> &RateSheetMetadata {
        &self.metadata
    }

    /// Returns the allowances and statutory rates.
    pub fn rates(&self) -> &PayrollRates {
        &self.rates
    }

    /// Returns the night window.
    pub fn night_window(&self) -> &NightWindow {
        &self.night_window
    }

    /// Returns the night hour measurement method.
    pub fn night_hours_method(&self) -> NightHoursMethod {
        self.night_hours_method
    }

    /// Returns the commission table.
    pub fn commission_table(&self) -> &CommissionTable {
        &self.commission_table
    }
}
