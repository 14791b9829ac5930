//! Conversions between domain rows and polars DataFrames
//!
//! Dates are stored as `YYYY-MM-DD` text, so sorting a table by its `date`
//! column as text is also chronological.

use crate::data::{DailyPoint, DailySeries, ForecastRow, Origin, Transaction};
use crate::error::{ForecastError, Result};
use crate::features::{FeatureRow, FeatureVector};
use crate::utils::date_parser::{format_date, format_timestamp, parse_date, parse_timestamp};
use polars::prelude::*;

pub const DATE_COLUMN: &str = "date";

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    df.column(name)
        .map_err(|e| ForecastError::DataError(format!("Column '{}' not found: {}", name, e)))
}

fn null_error(name: &str, row: usize) -> ForecastError {
    ForecastError::DataError(format!("Null value in column '{}' at row {}", name, row))
}

fn text_column(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let series = column(df, name)?.cast(&DataType::Utf8)?;
    let values = series.utf8()?;
    values
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.map(str::to_string).ok_or_else(|| null_error(name, row)))
        .collect()
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = column(df, name)?.cast(&DataType::Float64)?;
    let values = series.f64()?;
    values
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.ok_or_else(|| null_error(name, row)))
        .collect()
}

fn u32_column(df: &DataFrame, name: &str) -> Result<Vec<u32>> {
    let series = column(df, name)?.cast(&DataType::Int64)?;
    let values = series.i64()?;
    values
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            let v = v.ok_or_else(|| null_error(name, row))?;
            u32::try_from(v).map_err(|_| {
                ForecastError::DataError(format!(
                    "Value {} in column '{}' at row {} is out of range",
                    v, name, row
                ))
            })
        })
        .collect()
}

fn date_column(df: &DataFrame) -> Result<Vec<chrono::NaiveDate>> {
    text_column(df, DATE_COLUMN)?
        .iter()
        .map(|s| parse_date(s))
        .collect()
}

/// `order_id, date, customer_id, product_id, quantity, total_amount`
pub fn transactions_to_frame(transactions: &[Transaction]) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        Series::new(
            "order_id",
            transactions.iter().map(|t| t.order_id.clone()).collect::<Vec<_>>(),
        ),
        Series::new(
            DATE_COLUMN,
            transactions
                .iter()
                .map(|t| format_timestamp(t.timestamp))
                .collect::<Vec<_>>(),
        ),
        Series::new(
            "customer_id",
            transactions.iter().map(|t| t.customer_id.clone()).collect::<Vec<_>>(),
        ),
        Series::new(
            "product_id",
            transactions.iter().map(|t| t.product_id.clone()).collect::<Vec<_>>(),
        ),
        Series::new(
            "quantity",
            transactions.iter().map(|t| t.quantity).collect::<Vec<u32>>(),
        ),
        Series::new(
            "total_amount",
            transactions.iter().map(|t| t.total_amount).collect::<Vec<f64>>(),
        ),
    ])?;
    Ok(df)
}

pub fn transactions_from_frame(df: &DataFrame) -> Result<Vec<Transaction>> {
    let order_ids = text_column(df, "order_id")?;
    let timestamps = text_column(df, DATE_COLUMN)?;
    let customers = text_column(df, "customer_id")?;
    let products = text_column(df, "product_id")?;
    let quantities = u32_column(df, "quantity")?;
    let amounts = float_column(df, "total_amount")?;

    order_ids
        .into_iter()
        .zip(timestamps)
        .zip(customers)
        .zip(products)
        .zip(quantities)
        .zip(amounts)
        .map(
            |(((((order_id, ts), customer_id), product_id), quantity), total_amount)| {
                Ok(Transaction {
                    order_id,
                    timestamp: parse_timestamp(&ts)?,
                    customer_id,
                    product_id,
                    quantity,
                    total_amount,
                })
            },
        )
        .collect()
}

/// `date, total`
pub fn series_to_frame(series: &DailySeries) -> Result<DataFrame> {
    let (dates, totals): (Vec<String>, Vec<f64>) =
        series.points().map(|p| (format_date(p.date), p.total)).unzip();
    Ok(DataFrame::new(vec![
        Series::new(DATE_COLUMN, dates),
        Series::new("total", totals),
    ])?)
}

pub fn series_from_frame(df: &DataFrame) -> Result<DailySeries> {
    let mut points: Vec<DailyPoint> = date_column(df)?
        .into_iter()
        .zip(float_column(df, "total")?)
        .map(|(date, total)| DailyPoint { date, total })
        .collect();
    points.sort_by_key(|p| p.date);
    DailySeries::from_points(&points)
}

/// `date, target` followed by the feature columns in estimator order
pub fn features_to_frame(rows: &[FeatureRow]) -> Result<DataFrame> {
    let [dow, month, lag_1, lag_7, rolling] = FeatureVector::NAMES;
    Ok(DataFrame::new(vec![
        Series::new(
            DATE_COLUMN,
            rows.iter().map(|r| format_date(r.date)).collect::<Vec<_>>(),
        ),
        Series::new("target", rows.iter().map(|r| r.target).collect::<Vec<f64>>()),
        Series::new(
            dow,
            rows.iter().map(|r| r.features.day_of_week).collect::<Vec<u32>>(),
        ),
        Series::new(
            month,
            rows.iter().map(|r| r.features.month).collect::<Vec<u32>>(),
        ),
        Series::new(
            lag_1,
            rows.iter().map(|r| r.features.lag_1).collect::<Vec<f64>>(),
        ),
        Series::new(
            lag_7,
            rows.iter().map(|r| r.features.lag_7).collect::<Vec<f64>>(),
        ),
        Series::new(
            rolling,
            rows.iter().map(|r| r.features.rolling_mean_7).collect::<Vec<f64>>(),
        ),
    ])?)
}

pub fn features_from_frame(df: &DataFrame) -> Result<Vec<FeatureRow>> {
    let [dow, month, lag_1, lag_7, rolling] = FeatureVector::NAMES;
    let dates = date_column(df)?;
    let targets = float_column(df, "target")?;
    let dows = u32_column(df, dow)?;
    let months = u32_column(df, month)?;
    let lag_1s = float_column(df, lag_1)?;
    let lag_7s = float_column(df, lag_7)?;
    let rollings = float_column(df, rolling)?;

    Ok((0..dates.len())
        .map(|i| FeatureRow {
            date: dates[i],
            target: targets[i],
            features: FeatureVector {
                day_of_week: dows[i],
                month: months[i],
                lag_1: lag_1s[i],
                lag_7: lag_7s[i],
                rolling_mean_7: rollings[i],
            },
        })
        .collect())
}

/// `date, predicted_value, origin`
pub fn forecast_to_frame(rows: &[ForecastRow]) -> Result<DataFrame> {
    Ok(DataFrame::new(vec![
        Series::new(
            DATE_COLUMN,
            rows.iter().map(|r| format_date(r.date)).collect::<Vec<_>>(),
        ),
        Series::new(
            "predicted_value",
            rows.iter().map(|r| r.predicted_value).collect::<Vec<f64>>(),
        ),
        Series::new(
            "origin",
            rows.iter().map(|r| r.origin.as_str()).collect::<Vec<&str>>(),
        ),
    ])?)
}

pub fn forecast_from_frame(df: &DataFrame) -> Result<Vec<ForecastRow>> {
    let dates = date_column(df)?;
    let values = float_column(df, "predicted_value")?;
    let origins = text_column(df, "origin")?;

    dates
        .into_iter()
        .zip(values)
        .zip(origins)
        .map(|((date, predicted_value), origin)| {
            Ok(ForecastRow {
                date,
                predicted_value,
                origin: origin.parse::<Origin>()?,
            })
        })
        .collect()
}
