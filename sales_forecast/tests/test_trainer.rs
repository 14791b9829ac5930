mod common;

use common::{series, weekly_series};
use pretty_assertions::assert_eq;
use rstest::rstest;
use sales_forecast::config::{FeatureConfig, ModelConfig};
use sales_forecast::error::ForecastError;
use sales_forecast::features::FeatureBuilder;
use sales_forecast::models::forest::RandomForestRegressor;
use sales_forecast::models::TrainedRegressor;
use sales_forecast::trainer::{chronological_split, ModelTrainer};

fn forest(n_estimators: usize) -> RandomForestRegressor {
    RandomForestRegressor::new(ModelConfig {
        n_estimators,
        ..ModelConfig::default()
    })
    .unwrap()
}

#[rstest]
#[case(10, 0.9, 9)]
#[case(33, 0.9, 29)]
#[case(33, 0.5, 16)]
#[case(1, 0.9, 0)]
#[case(5, 1.0, 5)]
fn test_split_sizes(#[case] n: usize, #[case] fraction: f64, #[case] expected_train: usize) {
    let rows = FeatureBuilder::new(FeatureConfig::default()).rows(&weekly_series(n + 7)).unwrap();
    let (train, test) = chronological_split(&rows, fraction);

    assert_eq!(train.len(), expected_train);
    assert_eq!(train.len() + test.len(), n);
}

#[test]
fn test_split_has_no_leakage() {
    let rows = FeatureBuilder::new(FeatureConfig::default()).rows(&weekly_series(60)).unwrap();
    let (train, test) = chronological_split(&rows, 0.8);

    let last_train = train.iter().map(|r| r.date).max().unwrap();
    assert!(test.iter().all(|r| r.date > last_train));
}

#[test]
fn test_train_reports_hold_out_metrics() {
    let rows = FeatureBuilder::new(FeatureConfig::default())
        .build(&weekly_series(77))
        .unwrap();
    let outcome = ModelTrainer::new(forest(20), 0.9).unwrap().train(&rows).unwrap();

    assert_eq!(outcome.train_rows, 63);
    assert_eq!(outcome.test_rows, 7);
    assert_eq!(outcome.train_end, rows[62].date);
    assert_eq!(outcome.model.n_trees(), 20);

    let metrics = outcome.metrics.unwrap();
    assert_eq!(metrics.n, 7);
    // the weekly pattern is fully described by day_of_week
    assert!(metrics.mae < 1.0, "mae = {}", metrics.mae);
}

#[test]
fn test_empty_test_split_still_trains() {
    let rows = FeatureBuilder::new(FeatureConfig::default())
        .build(&series(vec![50.0; 9]))
        .unwrap();
    // two rows, both in the train split
    let outcome = ModelTrainer::new(forest(5), 1.0).unwrap().train(&rows).unwrap();

    assert_eq!(outcome.test_rows, 0);
    assert!(outcome.metrics.is_none());
    assert_eq!(outcome.model.predict(&rows[0].features), 50.0);
}

#[test]
fn test_empty_train_split_is_insufficient_data() {
    let rows = FeatureBuilder::new(FeatureConfig::default())
        .build(&series(vec![50.0; 8]))
        .unwrap();
    let result = ModelTrainer::new(forest(5), 0.9).unwrap().train(&rows);

    assert!(matches!(result, Err(ForecastError::InsufficientData(_))));
}

#[rstest]
#[case(0.0)]
#[case(-0.5)]
#[case(1.5)]
#[case(f64::NAN)]
fn test_invalid_fraction(#[case] fraction: f64) {
    assert!(matches!(
        ModelTrainer::new(forest(5), fraction),
        Err(ForecastError::InvalidParameter(_))
    ));
}
