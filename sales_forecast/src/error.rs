//! Error types for the sales_forecast crate

use polars::prelude::PolarsError;
use series_math::MathError;
use thiserror::Error;

/// Custom error types for the sales_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// No transactions were supplied to the aggregator
    #[error("Empty series: no transactions to aggregate")]
    EmptySeries,

    /// Fewer observations than the lag or rolling windows need
    #[error("Insufficient history: need at least {required} observations, have {available}")]
    InsufficientHistory { required: usize, available: usize },

    /// Nothing left to fit on after the chronological split
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The estimator rejected its input
    #[error("Model fit error: {0}")]
    ModelFitError(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),

    /// Error from the CSV reader
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Error while loading configuration
    #[error("Config error: {0}")]
    ConfigError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}

impl From<config::ConfigError> for ForecastError {
    fn from(err: config::ConfigError) -> Self {
        ForecastError::ConfigError(err.to_string())
    }
}

impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientData {
                required,
                available,
            } => ForecastError::InsufficientHistory {
                required,
                available,
            },
            MathError::InvalidInput(msg) => ForecastError::InvalidParameter(msg),
        }
    }
}
