//! Taxi Payroll Prediction Engine
//!
//! This crate predicts a commission-based taxi driver's payroll from raw shift
//! records: it derives night and overtime hours for shifts that may cross
//! midnight, then maps batch totals through a commission tier table and a
//! statutory deduction rate.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod import;
pub mod models;
