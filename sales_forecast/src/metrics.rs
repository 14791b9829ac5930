//! Metrics for evaluating forecast performance

use crate::data::{ForecastRow, Origin};
use serde::{Deserialize, Serialize};
use series_math::growth::{percent_change, tail_total};
use statrs::statistics::Statistics;

/// Hold-out accuracy of a trained model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Number of evaluated rows
    pub n: usize,
}

/// Score predictions against actual values.
///
/// Returns `None` when there is nothing to compare (empty or mismatched
/// inputs), which callers report as "no evaluation performed".
pub fn evaluate(actual: &[f64], predicted: &[f64]) -> Option<ErrorMetrics> {
    if actual.is_empty() || actual.len() != predicted.len() {
        return None;
    }

    let errors: Vec<f64> = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| a - p)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).mean();
    let rmse = errors.iter().quadratic_mean();

    Some(ErrorMetrics {
        mae,
        mse: rmse * rmse,
        rmse,
        n: errors.len(),
    })
}

impl std::fmt::Display for ErrorMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MAE: {:.2}, RMSE: {:.2} (n={})",
            self.mae, self.rmse, self.n
        )
    }
}

/// Headline numbers of a published forecast table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    /// Total of the last `window` historical days
    pub recent_total: f64,
    /// Total over the forecast horizon
    pub forecast_total: f64,
    /// Number of forecast days
    pub forecast_days: usize,
    /// `(forecast_total - recent_total) / recent_total * 100`; NaN when the
    /// recent total is zero
    pub growth_pct: f64,
}

impl ForecastSummary {
    /// Summarise an assembled forecast table
    pub fn from_rows(rows: &[ForecastRow], window: usize) -> Self {
        let history: Vec<f64> = rows
            .iter()
            .filter(|r| r.origin == Origin::History)
            .map(|r| r.predicted_value)
            .collect();
        let forecast: Vec<f64> = rows
            .iter()
            .filter(|r| r.origin == Origin::Forecast)
            .map(|r| r.predicted_value)
            .collect();

        let recent_total = tail_total(&history, window);
        let forecast_total: f64 = forecast.iter().sum();

        Self {
            recent_total,
            forecast_total,
            forecast_days: forecast.len(),
            growth_pct: percent_change(recent_total, forecast_total),
        }
    }

    /// Whether the growth percentage could be computed
    pub fn growth_defined(&self) -> bool {
        self.growth_pct.is_finite()
    }
}

impl std::fmt::Display for ForecastSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Summary:")?;
        writeln!(f, "  Recent total:    {:.2}", self.recent_total)?;
        writeln!(f, "  Forecast total:  {:.2}", self.forecast_total)?;
        writeln!(f, "  Forecast days:   {}", self.forecast_days)?;
        if self.growth_defined() {
            writeln!(f, "  Growth:          {:.1}%", self.growth_pct)?;
        } else {
            writeln!(f, "  Growth:          undefined")?;
        }
        Ok(())
    }
}
