//! # Series Math
//!
//! Small numeric building blocks for daily time series features.
//! This crate provides causal look-backs (lags), trailing rolling means
//! and guarded growth calculations.

use thiserror::Error;

pub mod growth;
pub mod lags;
pub mod rolling;

/// Errors that can occur in series calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: need {required} values, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for series math operations
pub type Result<T> = std::result::Result<T, MathError>;
