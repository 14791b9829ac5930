//! Collapse transactions into a gap-free daily series

use crate::data::{DailySeries, Transaction};
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Sums transaction amounts per calendar day
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesAggregator;

impl SeriesAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Group by day, sum `total_amount`, then reindex over the full inclusive
    /// date range filling absent days with zero.
    pub fn aggregate(&self, transactions: &[Transaction]) -> Result<DailySeries> {
        if transactions.is_empty() {
            return Err(ForecastError::EmptySeries);
        }

        let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for tx in transactions {
            tx.validate()?;
            *by_day.entry(tx.date()).or_insert(0.0) += tx.total_amount;
        }

        let (first, last) = match (by_day.keys().next(), by_day.keys().next_back()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Err(ForecastError::EmptySeries),
        };

        let totals: Vec<f64> = first
            .iter_days()
            .take_while(|d| *d <= last)
            .map(|d| by_day.get(&d).copied().unwrap_or(0.0))
            .collect();

        debug!(
            observed_days = by_day.len(),
            filled_days = totals.len() - by_day.len(),
            "reindexed daily totals"
        );
        info!(
            transactions = transactions.len(),
            days = totals.len(),
            start = %first,
            end = %last,
            "aggregated daily series"
        );

        DailySeries::new(first, totals)
    }
}
