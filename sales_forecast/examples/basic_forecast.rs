use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};
use sales_forecast::config::ForecastConfig;
use sales_forecast::data::{Origin, Transaction};
use sales_forecast::ingest::load_into_store;
use sales_forecast::pipeline::ForecastPipeline;
use sales_forecast::store::{MemoryTableStore, TableStore};
use sales_forecast::tables::forecast_from_frame;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Sales Forecast: Basic Forecasting Example");
    println!("=========================================\n");

    println!("Generating sample transactions...");
    let transactions = create_sample_transactions(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 180);
    println!("Sample data created: {} transactions\n", transactions.len());

    let mut config = ForecastConfig::default();
    config.forecast.horizon = 14;
    config.model.n_estimators = 50;

    let mut store = MemoryTableStore::new();
    load_into_store(&mut store, &config.store.sales_table, &transactions)?;

    println!("Running pipeline...");
    let mut pipeline = ForecastPipeline::new(store, config)?;
    let report = pipeline.run()?;

    println!(
        "Trained on {} days, tested on {} days",
        report.train_rows, report.test_rows
    );
    match report.metrics {
        Some(metrics) => println!("Hold-out accuracy: {}\n", metrics),
        None => println!("Hold-out accuracy: not evaluated\n"),
    }

    let table_name = pipeline.config().store.forecast_table.clone();
    let output = forecast_from_frame(&pipeline.store().read_table(&table_name)?)?;
    println!("Forecast:");
    for row in output.iter().filter(|r| r.origin == Origin::Forecast) {
        println!(
            "  {} ({:?}): {:>10.2}",
            row.date,
            row.date.weekday(),
            row.predicted_value
        );
    }

    println!("\n{}", report.summary);
    Ok(())
}

/// Weekdays see 10-30 orders, weekends 20-50; each order is 1-5 units of a
/// product priced between 10 and 500.
fn create_sample_transactions(start: NaiveDate, days: i64) -> Vec<Transaction> {
    let mut rng = StdRng::seed_from_u64(7);
    let price = Uniform::new(10.0, 500.0);
    let mut transactions = Vec::new();

    for day in 0..days {
        let date = start + Duration::days(day);
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        let orders = if weekend {
            rng.gen_range(20..=50)
        } else {
            rng.gen_range(10..=30)
        };

        for n in 0..orders {
            let quantity: u32 = rng.gen_range(1..=5);
            let unit_price: f64 = price.sample(&mut rng);
            let timestamp = date
                .and_hms_opt(rng.gen_range(0..24), rng.gen_range(0..60), rng.gen_range(0..60))
                .unwrap();

            transactions.push(Transaction {
                order_id: format!("ORD-{}-{:03}", date.format("%Y%m%d"), n),
                timestamp,
                customer_id: format!("CUST-{:04}", rng.gen_range(0..1000)),
                product_id: format!("PROD-{:03}", rng.gen_range(0..50)),
                quantity,
                total_amount: (unit_price * quantity as f64 * 100.0).round() / 100.0,
            });
        }
    }

    transactions
}
