//! Calendar and lag features for daily series
//!
//! Training rows and forecast steps both go through
//! [`FeatureVector::from_history`], so a feature means the same thing in
//! both places. The history handed to it always ends the day before the
//! row being described.

use crate::config::FeatureConfig;
use crate::data::DailySeries;
use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use series_math::lags::lag;
use series_math::rolling::trailing_mean;
use tracing::info;

/// Number of model inputs
pub const N_FEATURES: usize = 5;

/// Model input for one day, in the fixed order the estimator is trained on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: u32,
    /// 1 ..= 12
    pub month: u32,
    pub lag_1: f64,
    pub lag_7: f64,
    pub rolling_mean_7: f64,
}

impl FeatureVector {
    /// Column names, in estimator order
    pub const NAMES: [&'static str; N_FEATURES] =
        ["day_of_week", "month", "lag_1", "lag_7", "rolling_mean_7"];

    /// Describe `date` from the values observed strictly before it.
    pub fn from_history(date: NaiveDate, history: &[f64], config: &FeatureConfig) -> Result<Self> {
        let required = config.required_history();
        if history.len() < required {
            return Err(ForecastError::InsufficientHistory {
                required,
                available: history.len(),
            });
        }

        Ok(Self {
            day_of_week: date.weekday().num_days_from_monday(),
            month: date.month(),
            lag_1: lag(history, config.short_lag)?,
            lag_7: lag(history, config.long_lag)?,
            rolling_mean_7: trailing_mean(history, config.rolling_window)?,
        })
    }

    /// Values in [`FeatureVector::NAMES`] order
    pub fn to_array(&self) -> [f64; N_FEATURES] {
        [
            self.day_of_week as f64,
            self.month as f64,
            self.lag_1,
            self.lag_7,
            self.rolling_mean_7,
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

/// A trainable row: the day's total plus the features describing it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub date: NaiveDate,
    pub target: f64,
    pub features: FeatureVector,
}

/// Derives [`FeatureRow`]s from a daily series
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureBuilder {
    config: FeatureConfig,
}

impl FeatureBuilder {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Rows for every day whose look-backs are fully defined.
    ///
    /// The first `required_history()` days are skipped, never imputed. The
    /// result is empty when the series is too short; a zero lag or window
    /// is an `InvalidParameter` error.
    pub fn rows(&self, series: &DailySeries) -> Result<Vec<FeatureRow>> {
        let values = series.values();
        let skip = self.config.required_history();

        (skip..values.len())
            .map(|i| {
                let date = series.date_at(i);
                let features = FeatureVector::from_history(date, &values[..i], &self.config)?;
                Ok(FeatureRow {
                    date,
                    target: values[i],
                    features,
                })
            })
            .collect()
    }

    /// Like [`FeatureBuilder::rows`], but an empty result is an error.
    pub fn build(&self, series: &DailySeries) -> Result<Vec<FeatureRow>> {
        let rows = self.rows(series)?;
        if rows.is_empty() {
            return Err(ForecastError::InsufficientHistory {
                required: self.config.required_history() + 1,
                available: series.len(),
            });
        }

        info!(
            days = series.len(),
            rows = rows.len(),
            dropped = series.len() - rows.len(),
            "built feature rows"
        );
        Ok(rows)
    }
}
