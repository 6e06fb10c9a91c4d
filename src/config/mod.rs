//! Configuration loading and management for the taxi payroll engine.
//!
//! This module loads the rate sheet (allowances, deduction rate, night window
//! and commission tiers) from YAML files. [`PayrollConfig::default`] carries
//! the built-in rate sheet for callers that have no files.
//!
//! # Example
//!
//! ```no_run
//! use taxi_payroll::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/taxi_payroll").unwrap();
//! println!("Loaded rate sheet: {}", loader.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CommissionTable, CommissionTier, CommissionTiersFile, DEFAULT_COMMISSION_TIERS,
    MAX_SCAN_STEP_MINUTES, NightHoursMethod, NightWindow, PayrollConfig, PayrollRates,
    PayrollRulesFile, RateSheetMetadata,
};
