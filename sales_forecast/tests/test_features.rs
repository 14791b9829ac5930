mod common;

use approx::assert_relative_eq;
use chrono::{Datelike, Duration};
use common::{series, weekly_series};
use pretty_assertions::assert_eq;
use sales_forecast::config::FeatureConfig;
use sales_forecast::error::ForecastError;
use sales_forecast::features::{FeatureBuilder, FeatureVector};

fn builder() -> FeatureBuilder {
    FeatureBuilder::new(FeatureConfig::default())
}

#[test]
fn test_lags_point_at_earlier_days() {
    let values: Vec<f64> = (0..30).map(|i| (i * i) as f64).collect();
    let series = series(values.clone());
    let rows = builder().build(&series).unwrap();

    for row in &rows {
        let idx = (row.date - series.start_date()).num_days() as usize;
        assert_eq!(row.target, values[idx]);
        assert_eq!(row.features.lag_1, values[idx - 1]);
        assert_eq!(row.features.lag_7, values[idx - 7]);

        let window = &values[idx - 7..idx];
        assert_relative_eq!(
            row.features.rolling_mean_7,
            window.iter().sum::<f64>() / 7.0,
            epsilon = 1e-9
        );
    }
}

#[test]
fn test_first_week_is_dropped() {
    let series = weekly_series(20);
    let rows = builder().build(&series).unwrap();

    assert_eq!(rows.len(), 13);
    assert_eq!(rows[0].date, series.start_date() + Duration::days(7));
}

#[test]
fn test_calendar_fields() {
    let series = weekly_series(21);
    let rows = builder().build(&series).unwrap();

    for row in &rows {
        assert_eq!(row.features.day_of_week, row.date.weekday().num_days_from_monday());
        assert_eq!(row.features.month, row.date.month());
    }
}

#[test]
fn test_constant_series_features() {
    let rows = builder().build(&series(vec![100.0; 40])).unwrap();

    assert_eq!(rows.len(), 33);
    for row in rows {
        assert_eq!(row.features.lag_1, 100.0);
        assert_eq!(row.features.lag_7, 100.0);
        assert_eq!(row.features.rolling_mean_7, 100.0);
    }
}

#[test]
fn test_future_values_do_not_leak() {
    let mut values: Vec<f64> = (0..25).map(|i| i as f64).collect();
    let before = builder().rows(&series(values.clone())).unwrap();

    values[20] = 10_000.0;
    let after = builder().rows(&series(values)).unwrap();

    // rows up to and including day 20 only look at days before it
    for (a, b) in before.iter().zip(&after).take_while(|(a, _)| a.date.day() <= 21) {
        assert_eq!(a.features, b.features);
    }
}

#[test]
fn test_short_history_yields_no_rows() {
    let series = series(vec![10.0; 5]);

    assert!(builder().rows(&series).unwrap().is_empty());
    match builder().build(&series) {
        Err(ForecastError::InsufficientHistory { required, available }) => {
            assert_eq!(required, 8);
            assert_eq!(available, 5);
        }
        other => panic!("Expected InsufficientHistory, got {:?}", other),
    }
}

#[test]
fn test_exactly_seven_days_is_insufficient() {
    assert!(builder().build(&series(vec![1.0; 7])).is_err());
    assert_eq!(builder().build(&series(vec![1.0; 8])).unwrap().len(), 1);
}

#[test]
fn test_from_history_matches_builder_rows() {
    let series = weekly_series(30);
    let config = FeatureConfig::default();
    let rows = builder().build(&series).unwrap();
    let last = rows.last().unwrap();

    let rebuilt =
        FeatureVector::from_history(last.date, &series.values()[..series.len() - 1], &config)
            .unwrap();
    assert_eq!(rebuilt, last.features);
}

#[test]
fn test_zero_rolling_window_is_rejected() {
    let builder = FeatureBuilder::new(FeatureConfig {
        short_lag: 1,
        long_lag: 7,
        rolling_window: 0,
    });
    let result = builder.build(&weekly_series(40));
    assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));
}
