//! Error types for the taxi payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that can stop a payroll prediction.

use thiserror::Error;

/// The main error type for the taxi payroll engine.
///
/// The arithmetic itself is total; errors only arise while loading
/// configuration or converting raw input into validated shift records.
///
/// # Example
///
/// ```
/// use taxi_payroll::error::EngineError;
///
/// let error = EngineError::InvalidTimeOfDay {
///     field: "departure_time".to_string(),
///     value: "25:00".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid time of day for 'departure_time': 25:00");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the offending value.
        message: String,
    },

    /// A departure or return value is not a valid time of day.
    #[error("Invalid time of day for '{field}': {value}")]
    InvalidTimeOfDay {
        /// The field that held the value.
        field: String,
        /// The rejected text.
        value: String,
    },

    /// A shift record in a batch was invalid.
    #[error("Invalid shift at index {index}: {message}")]
    InvalidShift {
        /// Zero-based position of the record in the batch.
        index: usize,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// A CSV shift file could not be read.
    #[error("CSV import failed at line {line}: {message}")]
    CsvImport {
        /// One-based line number of the offending row (0 when unknown).
        line: u64,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
