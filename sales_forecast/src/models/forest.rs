//! Random forest regressor backed by `aprender`
//!
//! Every tree is grown on a bootstrap sample of the training rows and sees
//! all features at every split. Tree `i` draws its sample from a generator
//! seeded with `seed + i`, so a fit is reproducible from the seed. The
//! estimator works in `f32`; values are converted at this boundary.

use crate::config::ModelConfig;
use crate::error::{ForecastError, Result};
use crate::features::{FeatureVector, N_FEATURES};
use crate::models::{RegressionModel, TrainedRegressor};
use aprender::primitives::{Matrix, Vector};
use aprender::tree::RandomForestRegressor as Forest;
use tracing::debug;

/// Random forest regressor
#[derive(Debug, Clone)]
pub struct RandomForestRegressor {
    /// Name of the model
    name: String,
    config: ModelConfig,
}

/// Fitted random forest
#[derive(Debug, Clone)]
pub struct TrainedForest {
    /// Name of the model
    name: String,
    forest: Forest,
    n_trees: usize,
}

/// Row-major `f32` matrix with one row per feature vector
fn feature_matrix(rows: &[FeatureVector]) -> Result<Matrix<f32>> {
    let data: Vec<f32> = rows
        .iter()
        .flat_map(|row| row.to_array().map(|v| v as f32))
        .collect();
    Matrix::from_vec(rows.len(), N_FEATURES, data)
        .map_err(|e| ForecastError::ModelFitError(format!("Cannot build feature matrix: {}", e)))
}

impl RandomForestRegressor {
    /// Create a new forest with the given hyperparameters
    pub fn new(config: ModelConfig) -> Result<Self> {
        if config.n_estimators == 0 {
            return Err(ForecastError::InvalidParameter(
                "n_estimators must be greater than zero".to_string(),
            ));
        }
        if config.max_depth == Some(0) {
            return Err(ForecastError::InvalidParameter(
                "max_depth must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            name: format!(
                "Random Forest (n_estimators={}, seed={})",
                config.n_estimators, config.seed
            ),
            config,
        })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn estimator(&self) -> Forest {
        let forest = Forest::new(self.config.n_estimators).with_random_state(self.config.seed);
        match self.config.max_depth {
            Some(depth) => forest.with_max_depth(depth),
            None => forest,
        }
    }
}

impl RegressionModel for RandomForestRegressor {
    type Trained = TrainedForest;

    fn fit(&self, features: &[FeatureVector], targets: &[f64]) -> Result<Self::Trained> {
        if features.len() != targets.len() {
            return Err(ForecastError::ModelFitError(format!(
                "Feature rows ({}) don't match targets ({})",
                features.len(),
                targets.len()
            )));
        }
        if features.is_empty() {
            return Err(ForecastError::ModelFitError(
                "Cannot fit with zero samples".to_string(),
            ));
        }
        // the estimator sorts feature values and cannot order NaN
        if let Some(pos) = features.iter().position(|f| !f.is_finite()) {
            return Err(ForecastError::ModelFitError(format!(
                "Non-finite feature value in row {}",
                pos
            )));
        }
        if let Some(pos) = targets.iter().position(|t| !t.is_finite()) {
            return Err(ForecastError::ModelFitError(format!(
                "Non-finite target in row {}",
                pos
            )));
        }

        let x = feature_matrix(features)?;
        let y = Vector::from_vec(targets.iter().map(|&t| t as f32).collect());

        let mut forest = self.estimator();
        forest
            .fit(&x, &y)
            .map_err(|e| ForecastError::ModelFitError(e.to_string()))?;

        debug!(
            trees = self.config.n_estimators,
            samples = features.len(),
            "fitted random forest"
        );

        Ok(TrainedForest {
            name: self.name.clone(),
            forest,
            n_trees: self.config.n_estimators,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForest {
    pub fn n_trees(&self) -> usize {
        self.n_trees
    }
}

impl TrainedRegressor for TrainedForest {
    /// Mean over the trees; NaN if the sample cannot be shaped into a matrix
    fn predict(&self, features: &FeatureVector) -> f64 {
        self.predict_many(std::slice::from_ref(features))
            .first()
            .copied()
            .unwrap_or(f64::NAN)
    }

    fn predict_many(&self, rows: &[FeatureVector]) -> Vec<f64> {
        if rows.is_empty() {
            return Vec::new();
        }
        match feature_matrix(rows) {
            Ok(x) => self
                .forest
                .predict(&x)
                .as_slice()
                .iter()
                .map(|&v| f64::from(v))
                .collect(),
            Err(_) => vec![f64::NAN; rows.len()],
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
