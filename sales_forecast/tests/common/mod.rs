#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use sales_forecast::data::{DailySeries, Transaction};

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn transaction(id: &str, date: NaiveDate, hour: u32, amount: f64) -> Transaction {
    Transaction {
        order_id: id.to_string(),
        timestamp: date.and_hms_opt(hour, 0, 0).unwrap(),
        customer_id: "CUST-0001".to_string(),
        product_id: "PROD-001".to_string(),
        quantity: 1,
        total_amount: amount,
    }
}

/// One transaction per day worth `amount`, starting 2024-01-01
pub fn constant_transactions(days: i64, amount: f64) -> Vec<Transaction> {
    let start = day(2024, 1, 1);
    (0..days)
        .map(|d| transaction(&format!("ORD-{}", d), start + Duration::days(d), 12, amount))
        .collect()
}

pub fn series(values: Vec<f64>) -> DailySeries {
    DailySeries::new(day(2024, 1, 1), values).unwrap()
}

/// Weekly pattern: weekdays 100, weekends 250
pub fn weekly_series(days: usize) -> DailySeries {
    // 2024-01-01 is a Monday
    let values = (0..days)
        .map(|i| if i % 7 >= 5 { 250.0 } else { 100.0 })
        .collect();
    series(values)
}
