//! Chronological train/test split, fitting and hold-out evaluation

use crate::error::{ForecastError, Result};
use crate::features::{FeatureRow, FeatureVector};
use crate::metrics::{evaluate, ErrorMetrics};
use crate::models::{RegressionModel, TrainedRegressor};
use chrono::NaiveDate;
use tracing::{info, warn};

/// Split date-ordered rows into `(train, test)`.
///
/// The first `floor(n * train_fraction)` rows train, the rest test; no row
/// is shuffled so every training date precedes every test date.
pub fn chronological_split(rows: &[FeatureRow], train_fraction: f64) -> (&[FeatureRow], &[FeatureRow]) {
    let n_train = (rows.len() as f64 * train_fraction).floor() as usize;
    rows.split_at(n_train.min(rows.len()))
}

/// A fitted model together with how it was obtained
#[derive(Debug)]
pub struct TrainingOutcome<T: TrainedRegressor> {
    pub model: T,
    pub train_rows: usize,
    pub test_rows: usize,
    /// Last date seen in training
    pub train_end: NaiveDate,
    /// `None` when the test split was empty
    pub metrics: Option<ErrorMetrics>,
}

/// Fits a regression model on the oldest rows and scores it on the newest
#[derive(Debug, Clone)]
pub struct ModelTrainer<M: RegressionModel> {
    model: M,
    train_fraction: f64,
}

impl<M: RegressionModel> ModelTrainer<M> {
    pub fn new(model: M, train_fraction: f64) -> Result<Self> {
        if !(train_fraction > 0.0 && train_fraction <= 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "train_fraction must be in (0, 1], got {}",
                train_fraction
            )));
        }

        Ok(Self {
            model,
            train_fraction,
        })
    }

    pub fn train_fraction(&self) -> f64 {
        self.train_fraction
    }

    /// Split, fit and evaluate.
    ///
    /// Poor or missing evaluation does not stop training; the metrics are
    /// informational and the caller decides what to do with them.
    pub fn train(&self, rows: &[FeatureRow]) -> Result<TrainingOutcome<M::Trained>> {
        if let Some(pos) = rows.windows(2).position(|w| w[0].date >= w[1].date) {
            return Err(ForecastError::DataError(format!(
                "Feature rows must be strictly date-ordered (row {})",
                pos + 1
            )));
        }

        let (train, test) = chronological_split(rows, self.train_fraction);
        let train_end = match train.last() {
            Some(row) => row.date,
            None => {
                return Err(ForecastError::InsufficientData(format!(
                    "train split is empty ({} rows, fraction {})",
                    rows.len(),
                    self.train_fraction
                )))
            }
        };

        let features: Vec<FeatureVector> = train.iter().map(|r| r.features).collect();
        let targets: Vec<f64> = train.iter().map(|r| r.target).collect();

        info!(
            model = self.model.name(),
            train_rows = train.len(),
            test_rows = test.len(),
            "fitting model"
        );
        let model = self.model.fit(&features, &targets)?;

        let test_features: Vec<FeatureVector> = test.iter().map(|r| r.features).collect();
        let actual: Vec<f64> = test.iter().map(|r| r.target).collect();
        let predicted = model.predict_many(&test_features);
        let metrics = evaluate(&actual, &predicted);

        match &metrics {
            Some(m) => info!(mae = m.mae, rmse = m.rmse, n = m.n, "hold-out evaluation"),
            None => warn!("test split is empty; no evaluation performed"),
        }

        Ok(TrainingOutcome {
            model,
            train_rows: train.len(),
            test_rows: test.len(),
            train_end,
            metrics,
        })
    }
}
