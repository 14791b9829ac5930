mod common;

use common::day;
use pretty_assertions::assert_eq;
use sales_forecast::error::ForecastError;
use sales_forecast::ingest::{dedupe_by_order_id, load_into_store, read_transactions_csv};
use sales_forecast::store::{MemoryTableStore, TableStore};
use sales_forecast::tables::transactions_from_frame;
use std::io::Write;
use tempfile::NamedTempFile;

const HEADER: &str = "order_id,date,customer_id,product_id,quantity,total_amount";

fn csv_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn test_reads_every_timestamp_format() {
    let file = csv_file(&[
        "ORD-1,2024-01-01,C1,P1,1,10.0",
        "ORD-2,2024-01-02 08:30:00,C1,P1,2,20.0",
        "ORD-3,2024-01-03T23:59:59,C2,P2,3,30.0",
        "ORD-4,2024-01-04 12:00:00.250,C2,P2,4,40.0",
    ]);

    let txs = read_transactions_csv(file.path()).unwrap();

    let dates: Vec<_> = txs.iter().map(|t| t.date()).collect();
    assert_eq!(
        dates,
        vec![day(2024, 1, 1), day(2024, 1, 2), day(2024, 1, 3), day(2024, 1, 4)]
    );
    assert_eq!(txs[2].quantity, 3);
}

#[test]
fn test_last_duplicate_wins() {
    let file = csv_file(&[
        "ORD-1,2024-01-01 10:00:00,C1,P1,1,10.0",
        "ORD-2,2024-01-01 11:00:00,C1,P1,1,15.0",
        "ORD-1,2024-01-02 10:00:00,C1,P1,2,99.0",
    ]);

    let txs = read_transactions_csv(file.path()).unwrap();

    assert_eq!(txs.len(), 2);
    let first = txs.iter().find(|t| t.order_id == "ORD-1").unwrap();
    assert_eq!(first.total_amount, 99.0);
    assert_eq!(first.date(), day(2024, 1, 2));
}

#[test]
fn test_dedupe_without_duplicates_is_identity() {
    let txs = vec![
        common::transaction("a", day(2024, 1, 1), 1, 1.0),
        common::transaction("b", day(2024, 1, 1), 2, 2.0),
    ];
    assert_eq!(dedupe_by_order_id(txs.clone()), txs);
}

#[test]
fn test_bad_timestamp() {
    let file = csv_file(&["ORD-1,01/02/2024,C1,P1,1,10.0"]);
    assert!(read_transactions_csv(file.path()).is_err());
}

#[test]
fn test_negative_amount() {
    let file = csv_file(&["ORD-1,2024-01-01,C1,P1,1,-5.0"]);
    assert!(matches!(
        read_transactions_csv(file.path()),
        Err(ForecastError::DataError(_))
    ));
}

#[test]
fn test_missing_file() {
    assert!(read_transactions_csv("/nonexistent/sales.csv").is_err());
}

#[test]
fn test_load_into_store_replaces_sales_table() {
    let mut store = MemoryTableStore::new();
    let first = common::constant_transactions(10, 5.0);
    let second = common::constant_transactions(3, 7.0);

    assert_eq!(load_into_store(&mut store, "sales", &first).unwrap(), 10);
    assert_eq!(load_into_store(&mut store, "sales", &second).unwrap(), 3);

    let back = transactions_from_frame(&store.read_table("sales").unwrap()).unwrap();
    assert_eq!(back, second);
}
