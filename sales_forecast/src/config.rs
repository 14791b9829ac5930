//! Pipeline configuration
//!
//! Every tunable of the pipeline lives here with its default. Values are
//! layered from an optional TOML file and `SALES_FORECAST__<SECTION>__<KEY>`
//! environment variables (e.g. `SALES_FORECAST__FORECAST__HORIZON=14`).

use crate::error::{ForecastError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "SALES_FORECAST";

/// Complete configuration for one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub features: FeatureConfig,
    pub model: ModelConfig,
    pub training: TrainingConfig,
    pub forecast: HorizonConfig,
    pub store: StoreConfig,
}

/// Look-back windows used to build feature vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Short lag in days (`lag_1`)
    pub short_lag: usize,
    /// Long lag in days (`lag_7`)
    pub long_lag: usize,
    /// Trailing window for the rolling mean (`rolling_mean_7`)
    pub rolling_window: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            short_lag: 1,
            long_lag: 7,
            rolling_window: 7,
        }
    }
}

impl FeatureConfig {
    /// Leading days of a series that cannot carry a full feature vector
    pub fn required_history(&self) -> usize {
        series_math::lags::required_history(
            &[self.short_lag, self.long_lag],
            self.rolling_window,
        )
    }
}

/// Hyperparameters of the bagged tree ensemble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub n_estimators: usize,
    pub seed: u64,
    /// Unlimited when unset
    pub max_depth: Option<usize>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            seed: 42,
            max_depth: None,
        }
    }
}

/// Chronological split settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Share of the oldest feature rows used for fitting
    pub train_fraction: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            train_fraction: 0.9,
        }
    }
}

/// Forecast horizon and reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizonConfig {
    /// Number of future days to roll out
    pub horizon: usize,
    /// Trailing history days compared against the forecast in the summary
    pub summary_window: usize,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            horizon: 30,
            summary_window: 30,
        }
    }
}

/// Location and table names of the table store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub sales_table: String,
    pub daily_series_table: String,
    pub feature_table: String,
    pub forecast_table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            sales_table: "sales".to_string(),
            daily_series_table: "daily_series".to_string(),
            feature_table: "daily_sales".to_string(),
            forecast_table: "forecasts".to_string(),
        }
    }
}

impl ForecastConfig {
    /// Load configuration from an optional TOML file plus environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ForecastError::ConfigError(format!(
                    "Config file '{}' not found",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path.to_path_buf()));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: ForecastConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter against its admissible range
    pub fn validate(&self) -> Result<()> {
        let f = &self.features;
        if f.short_lag == 0 || f.long_lag == 0 || f.rolling_window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Lags and rolling window must be greater than zero".to_string(),
            ));
        }

        if self.model.n_estimators == 0 {
            return Err(ForecastError::InvalidParameter(
                "n_estimators must be greater than zero".to_string(),
            ));
        }
        if self.model.max_depth == Some(0) {
            return Err(ForecastError::InvalidParameter(
                "max_depth must be greater than zero".to_string(),
            ));
        }

        let fraction = self.training.train_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "train_fraction must be in (0, 1], got {}",
                fraction
            )));
        }

        if self.forecast.horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "Forecast horizon must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = ForecastConfig::default();
        assert_eq!(config.features.short_lag, 1);
        assert_eq!(config.features.long_lag, 7);
        assert_eq!(config.features.rolling_window, 7);
        assert_eq!(config.features.required_history(), 7);
        assert_eq!(config.model.n_estimators, 100);
        assert_eq!(config.model.seed, 42);
        assert_eq!(config.training.train_fraction, 0.9);
        assert_eq!(config.forecast.horizon, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_fraction() {
        let mut config = ForecastConfig::default();
        config.training.train_fraction = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ForecastError::InvalidParameter(_))
        ));

        config.training.train_fraction = 1.5;
        assert!(config.validate().is_err());

        config.training.train_fraction = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_horizon() {
        let mut config = ForecastConfig::default();
        config.forecast.horizon = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let result = ForecastConfig::load(Some(Path::new("/nonexistent/forecast.toml")));
        assert!(matches!(result, Err(ForecastError::ConfigError(_))));
    }
}
