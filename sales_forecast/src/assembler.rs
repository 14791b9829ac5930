//! Combine history and forecast into the published table

use crate::data::{DailySeries, ForecastRow, Origin};
use crate::error::{ForecastError, Result};
use tracing::info;

/// Builds the output table: every historical day labelled `history`
/// followed by the forecast days, sorted by date.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastAssembler;

impl ForecastAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Union of the full daily series (including the warm-up days that never
    /// became training rows) and the forecast.
    pub fn assemble(&self, series: &DailySeries, forecast: &[ForecastRow]) -> Result<Vec<ForecastRow>> {
        if let Some(row) = forecast.iter().find(|r| r.origin != Origin::Forecast) {
            return Err(ForecastError::DataError(format!(
                "Forecast rows must be labelled 'forecast', got '{}' on {}",
                row.origin, row.date
            )));
        }
        if let Some(row) = forecast.iter().find(|r| r.date <= series.end_date()) {
            return Err(ForecastError::DataError(format!(
                "Forecast date {} overlaps history ending {}",
                row.date,
                series.end_date()
            )));
        }

        let mut rows: Vec<ForecastRow> = series
            .points()
            .map(|p| ForecastRow {
                date: p.date,
                predicted_value: p.total,
                origin: Origin::History,
            })
            .chain(forecast.iter().copied())
            .collect();
        rows.sort_by_key(|r| r.date);

        info!(
            history = series.len(),
            forecast = forecast.len(),
            "assembled forecast table"
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn history_then_forecast_sorted() {
        let series = DailySeries::new(day(1), vec![1.0, 2.0, 3.0]).unwrap();
        let forecast = vec![
            ForecastRow {
                date: day(5),
                predicted_value: 5.0,
                origin: Origin::Forecast,
            },
            ForecastRow {
                date: day(4),
                predicted_value: 4.0,
                origin: Origin::Forecast,
            },
        ];

        let rows = ForecastAssembler::new().assemble(&series, &forecast).unwrap();

        assert_eq!(rows.len(), 5);
        let dates: Vec<_> = rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![day(1), day(2), day(3), day(4), day(5)]);
        assert_eq!(rows[2].origin, Origin::History);
        assert_eq!(rows[3].origin, Origin::Forecast);
        assert_eq!(rows[3].predicted_value, 4.0);
    }

    #[test]
    fn overlapping_forecast_is_rejected() {
        let series = DailySeries::new(day(1), vec![1.0, 2.0]).unwrap();
        let forecast = vec![ForecastRow {
            date: day(2),
            predicted_value: 1.0,
            origin: Origin::Forecast,
        }];
        assert!(ForecastAssembler::new().assemble(&series, &forecast).is_err());
    }
}
