//! End-to-end forecasting run against a table store

use crate::aggregate::SeriesAggregator;
use crate::assembler::ForecastAssembler;
use crate::config::ForecastConfig;
use crate::error::{ForecastError, Result};
use crate::features::FeatureBuilder;
use crate::forecaster::RecursiveForecaster;
use crate::metrics::{ErrorMetrics, ForecastSummary};
use crate::models::forest::RandomForestRegressor;
use crate::store::TableStore;
use crate::tables;
use crate::trainer::ModelTrainer;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, info_span, warn};

/// What a pipeline run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub transactions: usize,
    pub series_days: usize,
    pub series_start: NaiveDate,
    pub series_end: NaiveDate,
    pub feature_rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub train_end: NaiveDate,
    /// `None` when the test split was empty
    pub metrics: Option<ErrorMetrics>,
    pub forecast_start: NaiveDate,
    pub forecast_end: NaiveDate,
    pub output_rows: usize,
    pub summary: ForecastSummary,
}

/// Runs aggregation, feature building, training, forecasting and assembly
/// in sequence, publishing each table to the store.
#[derive(Debug)]
pub struct ForecastPipeline<S: TableStore> {
    store: S,
    config: ForecastConfig,
}

impl<S: TableStore> ForecastPipeline<S> {
    pub fn new(store: S, config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Execute one full run. Any failure aborts the run; tables written
    /// before the failing step keep their new contents.
    pub fn run(&mut self) -> Result<PipelineReport> {
        let span = info_span!("pipeline");
        let _guard = span.enter();
        let names = self.config.store.clone();

        if !self.store.has_table(&names.sales_table) {
            return Err(ForecastError::DataError(format!(
                "Sales table '{}' has not been loaded",
                names.sales_table
            )));
        }
        let transactions = tables::transactions_from_frame(&self.store.read_table(&names.sales_table)?)?;
        info!(rows = transactions.len(), "read transactions");

        let series = SeriesAggregator::new().aggregate(&transactions)?;
        self.store
            .replace_table(&names.daily_series_table, tables::series_to_frame(&series)?)?;

        let builder = FeatureBuilder::new(self.config.features);
        let rows = builder.build(&series)?;
        self.store
            .replace_table(&names.feature_table, tables::features_to_frame(&rows)?)?;

        let model = RandomForestRegressor::new(self.config.model)?;
        let trainer = ModelTrainer::new(model, self.config.training.train_fraction)?;
        let outcome = trainer.train(&rows)?;
        if outcome.metrics.is_none() {
            warn!("forecasting without a hold-out evaluation");
        }

        let forecaster =
            RecursiveForecaster::new(self.config.features, self.config.forecast.horizon)?;
        let forecast = forecaster.forecast_series(&outcome.model, &series)?;
        let (forecast_start, forecast_end) = match (forecast.first(), forecast.last()) {
            (Some(first), Some(last)) => (first.date, last.date),
            _ => {
                return Err(ForecastError::DataError(
                    "Forecaster produced no rows".to_string(),
                ))
            }
        };

        let output = ForecastAssembler::new().assemble(&series, &forecast)?;
        self.store
            .replace_table(&names.forecast_table, tables::forecast_to_frame(&output)?)?;

        let summary = ForecastSummary::from_rows(&output, self.config.forecast.summary_window);
        if !summary.growth_defined() {
            warn!(
                window = self.config.forecast.summary_window,
                "recent sales total is zero; growth is undefined"
            );
        }
        info!(
            recent_total = summary.recent_total,
            forecast_total = summary.forecast_total,
            growth_pct = summary.growth_pct,
            "pipeline finished"
        );

        Ok(PipelineReport {
            transactions: transactions.len(),
            series_days: series.len(),
            series_start: series.start_date(),
            series_end: series.end_date(),
            feature_rows: rows.len(),
            train_rows: outcome.train_rows,
            test_rows: outcome.test_rows,
            train_end: outcome.train_end,
            metrics: outcome.metrics,
            forecast_start,
            forecast_end,
            output_rows: output.len(),
            summary,
        })
    }
}
