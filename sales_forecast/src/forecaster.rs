//! Recursive multi-step forecasting
//!
//! Each future day is described with the same [`FeatureVector`] used in
//! training, computed from a buffer holding the real history followed by
//! every prediction made so far. The prediction is then appended to the
//! buffer, so day `i + 1` sees day `i`'s forecast as its `lag_1`. Errors
//! compound across the horizon; days are never predicted independently.

use crate::config::FeatureConfig;
use crate::data::{DailySeries, ForecastRow, Origin};
use crate::error::{ForecastError, Result};
use crate::features::FeatureVector;
use crate::models::TrainedRegressor;
use chrono::{Days, NaiveDate};
use tracing::{debug, info};

/// Rolls a trained model forward over a fixed horizon
#[derive(Debug, Clone, Copy)]
pub struct RecursiveForecaster {
    features: FeatureConfig,
    horizon: usize,
}

impl RecursiveForecaster {
    pub fn new(features: FeatureConfig, horizon: usize) -> Result<Self> {
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "Forecast horizon must be greater than zero".to_string(),
            ));
        }

        Ok(Self { features, horizon })
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Start a rollout from `history`, whose last value belongs to `last_date`.
    ///
    /// The buffer is owned by the rollout and only ever grows.
    pub fn rollout<'m, M: TrainedRegressor>(
        &self,
        model: &'m M,
        history: Vec<f64>,
        last_date: NaiveDate,
    ) -> Result<Rollout<'m, M>> {
        let required = self.features.required_history();
        if history.len() < required {
            return Err(ForecastError::InsufficientHistory {
                required,
                available: history.len(),
            });
        }
        if let Some(bad) = history.iter().find(|v| !v.is_finite()) {
            return Err(ForecastError::DataError(format!(
                "Seed history contains a non-finite value ({})",
                bad
            )));
        }

        Ok(Rollout {
            model,
            features: self.features,
            buffer: history,
            last_date,
            taken: 0,
            horizon: self.horizon,
        })
    }

    /// Predict exactly `horizon` days after `last_date`.
    pub fn forecast<M: TrainedRegressor>(
        &self,
        model: &M,
        history: Vec<f64>,
        last_date: NaiveDate,
    ) -> Result<Vec<ForecastRow>> {
        let rows = self
            .rollout(model, history, last_date)?
            .collect::<Result<Vec<_>>>()?;

        if let (Some(first), Some(last)) = (rows.first(), rows.last()) {
            info!(
                days = rows.len(),
                from = %first.date,
                to = %last.date,
                model = model.name(),
                "generated recursive forecast"
            );
        }
        Ok(rows)
    }

    /// Forecast past the end of a daily series, seeding with all its totals.
    pub fn forecast_series<M: TrainedRegressor>(
        &self,
        model: &M,
        series: &DailySeries,
    ) -> Result<Vec<ForecastRow>> {
        self.forecast(model, series.values().to_vec(), series.end_date())
    }
}

/// In-progress rollout; yields one forecast day per `next()`
#[derive(Debug)]
pub struct Rollout<'m, M: TrainedRegressor> {
    model: &'m M,
    features: FeatureConfig,
    buffer: Vec<f64>,
    last_date: NaiveDate,
    taken: usize,
    horizon: usize,
}

impl<'m, M: TrainedRegressor> Rollout<'m, M> {
    /// Current length of the value buffer (history plus predictions)
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// History followed by the predictions made so far
    pub fn buffer(&self) -> &[f64] {
        &self.buffer
    }

    /// Steps completed so far
    pub fn steps_taken(&self) -> usize {
        self.taken
    }

    fn advance(&mut self) -> Result<ForecastRow> {
        let step = self.taken + 1;
        let date = self
            .last_date
            .checked_add_days(Days::new(step as u64))
            .ok_or_else(|| ForecastError::DataError("Forecast date out of range".to_string()))?;

        let features = FeatureVector::from_history(date, &self.buffer, &self.features)?;
        let value = self.model.predict(&features);
        if !value.is_finite() {
            return Err(ForecastError::ModelFitError(format!(
                "Model produced a non-finite prediction for {}",
                date
            )));
        }

        self.buffer.push(value);
        self.taken = step;
        debug!(step, %date, value, lag_1 = features.lag_1, "forecast step");

        Ok(ForecastRow {
            date,
            predicted_value: value,
            origin: Origin::Forecast,
        })
    }
}

impl<'m, M: TrainedRegressor> Iterator for Rollout<'m, M> {
    type Item = Result<ForecastRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.taken >= self.horizon {
            return None;
        }

        let result = self.advance();
        if result.is_err() {
            // stop after the first failure
            self.taken = self.horizon;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.horizon - self.taken;
        (0, Some(remaining))
    }
}
