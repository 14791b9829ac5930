//! # Sales Forecast
//!
//! Daily sales forecasting from raw transaction records.
//!
//! ## Features
//!
//! - Gap-free daily aggregation of transactions
//! - Causal lag, rolling-mean and calendar features
//! - Bagged regression trees with seeded, reproducible fitting
//! - Chronological train/test evaluation (MAE, RMSE)
//! - Recursive multi-step forecasting that feeds each prediction back
//!   into the next day's features
//! - Named table storage (CSV directory or in-memory)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sales_forecast::config::ForecastConfig;
//! use sales_forecast::ingest::{load_into_store, read_transactions_csv};
//! use sales_forecast::pipeline::ForecastPipeline;
//! use sales_forecast::store::CsvTableStore;
//!
//! # fn main() -> sales_forecast::Result<()> {
//! let config = ForecastConfig::load(None)?;
//! let mut store = CsvTableStore::open(&config.store.data_dir)?;
//!
//! let transactions = read_transactions_csv("sales.csv")?;
//! load_into_store(&mut store, &config.store.sales_table, &transactions)?;
//!
//! let report = ForecastPipeline::new(store, config)?.run()?;
//! println!("{}", report.summary);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod assembler;
pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod forecaster;
pub mod ingest;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod store;
pub mod tables;
pub mod trainer;
pub mod utils;

// Re-export commonly used types
pub use crate::config::ForecastConfig;
pub use crate::data::{DailySeries, ForecastRow, Origin, Transaction};
pub use crate::error::{ForecastError, Result};
pub use crate::features::{FeatureBuilder, FeatureRow, FeatureVector};
pub use crate::forecaster::RecursiveForecaster;
pub use crate::models::{RegressionModel, TrainedRegressor};
pub use crate::pipeline::{ForecastPipeline, PipelineReport};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
