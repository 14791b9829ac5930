//! Loading raw sales exports into the table store

use crate::data::Transaction;
use crate::error::{ForecastError, Result};
use crate::store::TableStore;
use crate::tables::transactions_to_frame;
use crate::utils::date_parser::parse_timestamp;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// One line of a raw sales CSV export
#[derive(Debug, Deserialize)]
struct RawTransaction {
    order_id: String,
    #[serde(alias = "timestamp")]
    date: String,
    customer_id: String,
    product_id: String,
    quantity: i64,
    total_amount: f64,
}

impl RawTransaction {
    fn into_transaction(self, line: usize) -> Result<Transaction> {
        let quantity = u32::try_from(self.quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| {
                ForecastError::DataError(format!(
                    "Line {}: quantity must be a positive integer, got {}",
                    line, self.quantity
                ))
            })?;

        let tx = Transaction {
            timestamp: parse_timestamp(&self.date)?,
            order_id: self.order_id,
            customer_id: self.customer_id,
            product_id: self.product_id,
            quantity,
            total_amount: self.total_amount,
        };
        tx.validate()?;
        Ok(tx)
    }
}

/// Read transactions from a CSV file with a header row
pub fn read_transactions_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>> {
    let reader = csv::Reader::from_path(path.as_ref())?;
    read_transactions(reader)
}

/// Read transactions from any CSV source with a header row
pub fn read_transactions<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<Transaction>> {
    let mut transactions = Vec::new();
    for (i, record) in reader.deserialize::<RawTransaction>().enumerate() {
        // line 1 is the header
        transactions.push(record?.into_transaction(i + 2)?);
    }

    let total = transactions.len();
    let transactions = dedupe_by_order_id(transactions);
    if transactions.len() < total {
        warn!(
            duplicates = total - transactions.len(),
            "replaced duplicate order ids with their last occurrence"
        );
    }

    Ok(transactions)
}

/// Keep one record per `order_id`, the last one seen, at the position of
/// the first one seen.
pub fn dedupe_by_order_id(transactions: Vec<Transaction>) -> Vec<Transaction> {
    let mut position: HashMap<String, usize> = HashMap::with_capacity(transactions.len());
    let mut unique: Vec<Transaction> = Vec::with_capacity(transactions.len());

    for tx in transactions {
        match position.get(&tx.order_id) {
            Some(&idx) => unique[idx] = tx,
            None => {
                position.insert(tx.order_id.clone(), unique.len());
                unique.push(tx);
            }
        }
    }

    unique
}

/// Replace the sales table with `transactions`; returns the row count
pub fn load_into_store<S: TableStore>(
    store: &mut S,
    table: &str,
    transactions: &[Transaction],
) -> Result<usize> {
    let df = transactions_to_frame(transactions)?;
    let rows = df.height();
    store.replace_table(table, df)?;
    info!(table, rows, "loaded transactions");
    Ok(rows)
}
