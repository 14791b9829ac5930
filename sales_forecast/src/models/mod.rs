//! Regression models mapping a [`FeatureVector`] to a daily total

use crate::error::Result;
use crate::features::FeatureVector;
use std::fmt::Debug;

/// Trained regressor
pub trait TrainedRegressor: Debug {
    /// Predict the target for one feature vector
    fn predict(&self, features: &FeatureVector) -> f64;

    /// Predict a batch of feature vectors
    fn predict_many(&self, rows: &[FeatureVector]) -> Vec<f64> {
        rows.iter().map(|row| self.predict(row)).collect()
    }

    /// Name of the model
    fn name(&self) -> &str;
}

/// Regression model that can be fitted on feature rows
pub trait RegressionModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedRegressor;

    /// Fit the model on features and their targets
    fn fit(&self, features: &[FeatureVector], targets: &[f64]) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod forest;
