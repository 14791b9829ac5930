//! Domain records flowing through the pipeline

use crate::error::{ForecastError, Result};
use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single sales order as delivered by the source system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique order identifier
    pub order_id: String,
    /// Time the order was placed (naive, no timezone)
    pub timestamp: NaiveDateTime,
    pub customer_id: String,
    pub product_id: String,
    /// Units ordered, always positive
    pub quantity: u32,
    /// Order value, finite and non-negative
    pub total_amount: f64,
}

impl Transaction {
    /// Calendar day the order belongs to
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Check the record against the source schema constraints
    pub fn validate(&self) -> Result<()> {
        if self.quantity == 0 {
            return Err(ForecastError::DataError(format!(
                "Order '{}' has a non-positive quantity",
                self.order_id
            )));
        }

        if !self.total_amount.is_finite() || self.total_amount < 0.0 {
            return Err(ForecastError::DataError(format!(
                "Order '{}' has an invalid total_amount ({})",
                self.order_id, self.total_amount
            )));
        }

        Ok(())
    }
}

/// One day of a [`DailySeries`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub total: f64,
}

/// Gap-free daily totals
///
/// The series stores its first date and one total per consecutive calendar
/// day, so a missing day cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    start: NaiveDate,
    totals: Vec<f64>,
}

impl DailySeries {
    /// Create a series starting at `start` with one total per day
    pub fn new(start: NaiveDate, totals: Vec<f64>) -> Result<Self> {
        if totals.is_empty() {
            return Err(ForecastError::EmptySeries);
        }

        if let Some(bad) = totals.iter().find(|t| !t.is_finite() || **t < 0.0) {
            return Err(ForecastError::DataError(format!(
                "Daily totals must be finite and non-negative, got {}",
                bad
            )));
        }

        // the end date has to be representable
        start
            .checked_add_days(Days::new(totals.len() as u64 - 1))
            .ok_or_else(|| ForecastError::DataError("Series runs past the calendar".to_string()))?;

        Ok(Self { start, totals })
    }

    /// Build a series from explicit points, which must be consecutive days
    pub fn from_points(points: &[DailyPoint]) -> Result<Self> {
        let first = points.first().ok_or(ForecastError::EmptySeries)?;

        for (i, pair) in points.windows(2).enumerate() {
            if pair[0].date.succ_opt() != Some(pair[1].date) {
                return Err(ForecastError::DataError(format!(
                    "Daily series is not contiguous at position {}: {} then {}",
                    i + 1,
                    pair[0].date,
                    pair[1].date
                )));
            }
        }

        Self::new(first.date, points.iter().map(|p| p.total).collect())
    }

    /// First day of the series
    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the series
    pub fn end_date(&self) -> NaiveDate {
        self.date_at(self.totals.len() - 1)
    }

    /// Date of the `index`-th entry
    pub fn date_at(&self, index: usize) -> NaiveDate {
        self.start + Days::new(index as u64)
    }

    /// Daily totals in date order
    pub fn values(&self) -> &[f64] {
        &self.totals
    }

    /// Iterate over `(date, total)` points
    pub fn points(&self) -> impl Iterator<Item = DailyPoint> + '_ {
        self.totals.iter().enumerate().map(move |(i, &total)| DailyPoint {
            date: self.date_at(i),
            total,
        })
    }

    /// Get the length of the series
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Where a row of the output table came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    History,
    Forecast,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::History => "history",
            Origin::Forecast => "forecast",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Origin {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "history" => Ok(Origin::History),
            "forecast" => Ok(Origin::Forecast),
            other => Err(ForecastError::DataError(format!(
                "Unknown origin '{}'",
                other
            ))),
        }
    }
}

/// One row of the published forecast table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub predicted_value: f64,
    pub origin: Origin,
}
