//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{
    CommissionTable, CommissionTiersFile, PayrollConfig, PayrollRulesFile, RateSheetMetadata,
};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/taxi_payroll/
/// ├── payroll.yaml           # Metadata, rates, night window, method
/// └── commission_tiers.yaml  # Revenue threshold → base pay
/// ```
///
/// # Example
///
/// ```no_run
/// use taxi_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/taxi_payroll").unwrap();
/// let lowest = loader.config().commission_table().lowest_threshold();
/// println!("Commission starts at ¥{}", lowest);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/taxi_payroll")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - Any value fails validation (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rules = Self::load_yaml::<PayrollRulesFile>(&path.join("payroll.yaml"))?;
        let tiers = Self::load_yaml::<CommissionTiersFile>(&path.join("commission_tiers.yaml"))?;

        let commission_table = CommissionTable::new(tiers.tiers)?;
        let config = PayrollConfig::new(
            rules.metadata,
            rules.rates,
            rules.night_window,
            rules.night_hours_method,
            commission_table,
        )?;

        debug!(
            path = %path.display(),
            version = %config.metadata().version,
            tiers = config.commission_table().tiers().len(),
            night_hours_method = %config.night_hours_method(),
            "Loaded payroll configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration, such as the built-in default.
    pub fn from_config(config: PayrollConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the rate sheet metadata.
    pub fn metadata(&self) -> &RateSheetMetadata {
        self.config.metadata()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::from_config(PayrollConfig::default())
    }
}
