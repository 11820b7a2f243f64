use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::{debug, info, warn};
use shared::{Transaction, TransactionType};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::connection::{CsvConnection, TRANSACTIONS_HEADER};
use crate::domain::models::transaction::InvalidRecordError;
use crate::storage::traits::TransactionStorage;

const ID_FIELD: usize = 0;
const DATE_FIELD: usize = 5;

/// CSV-based transaction repository.
///
/// Rows are kept as raw records until a month is listed. A malformed row only
/// fails listings of the month it belongs to, and store/delete rewrite the
/// file without interpreting other rows.
#[derive(Clone)]
pub struct TransactionRepository {
    connection: CsvConnection,
}

impl TransactionRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Every data row of the CSV file in file order
    fn read_records(&self) -> Result<Vec<StringRecord>> {
        self.connection.ensure_transactions_file_exists()?;

        let file_path = self.connection.transactions_file_path();
        let file = File::open(&file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;
        let mut csv_reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(BufReader::new(file));

        let records = csv_reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to read {}", file_path.display()))?;

        debug!("Read {} rows from {}", records.len(), file_path.display());
        Ok(records)
    }

    /// Rewrite the CSV file with `records`
    fn write_records(&self, records: &[StringRecord]) -> Result<()> {
        let file_path = self.connection.transactions_file_path();
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let mut csv_writer = WriterBuilder::new()
                .flexible(true)
                .from_writer(BufWriter::new(file));

            csv_writer.write_record(TRANSACTIONS_HEADER)?;
            for record in records {
                csv_writer.write_record(record)?;
            }
            csv_writer.flush()?;
        }

        fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("").trim()
}

fn to_record(transaction: &Transaction) -> StringRecord {
    let amount = transaction.amount.to_string();
    let date = transaction.date.format("%Y-%m-%d").to_string();
    StringRecord::from(vec![
        transaction.id.as_str(),
        transaction.transaction_type.as_str(),
        transaction.category.as_str(),
        transaction.description.as_str(),
        amount.as_str(),
        date.as_str(),
    ])
}

/// Year and month a row is filed under. Falls back to the `YYYY-MM` prefix
/// when the full date does not parse, so `2024-03-3x` still belongs to March.
fn record_month(record: &StringRecord) -> Option<(i32, u32)> {
    let value = field(record, DATE_FIELD);
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some((date.year(), date.month()));
    }

    let mut parts = value.splitn(3, '-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

/// Parse one CSV row. Malformed fields become [`InvalidRecordError`] rather
/// than being coerced to defaults.
fn parse_record(record: &StringRecord) -> Result<Transaction, InvalidRecordError> {
    let id = field(record, ID_FIELD).to_string();

    let transaction_type = field(record, 1)
        .parse::<TransactionType>()
        .map_err(|_| InvalidRecordError::UnknownType {
            id: id.clone(),
            value: field(record, 1).to_string(),
        })?;
    let amount = field(record, 4)
        .parse::<f64>()
        .map_err(|_| InvalidRecordError::UnparseableAmount {
            id: id.clone(),
            value: field(record, 4).to_string(),
        })?;
    let date = NaiveDate::parse_from_str(field(record, DATE_FIELD), "%Y-%m-%d").map_err(|_| {
        InvalidRecordError::UnparseableDate {
            id: id.clone(),
            value: field(record, DATE_FIELD).to_string(),
        }
    })?;

    Ok(Transaction {
        id,
        transaction_type,
        category: field(record, 2).to_string(),
        amount,
        description: record.get(3).unwrap_or("").to_string(),
        date,
    })
}

impl TransactionStorage for TransactionRepository {
    fn store_transaction(&self, transaction: &Transaction) -> Result<()> {
        let mut records = self.read_records()?;
        records.push(to_record(transaction));
        self.write_records(&records)?;
        info!("Stored transaction {}", transaction.id);
        Ok(())
    }

    fn list_transactions_for_month(&self, month: u32, year: i32) -> Result<Vec<Transaction>> {
        let mut transactions = Vec::new();
        for record in self.read_records()? {
            match record_month(&record) {
                Some(filed_under) if filed_under == (year, month) => {
                    transactions.push(parse_record(&record)?);
                }
                Some(_) => {}
                None => warn!(
                    "Skipping transaction {} with undatable date '{}'",
                    field(&record, ID_FIELD),
                    field(&record, DATE_FIELD)
                ),
            }
        }
        debug!("Found {} transactions for {}/{}", transactions.len(), month, year);
        Ok(transactions)
    }

    fn delete_transaction(&self, transaction_id: &str) -> Result<bool> {
        let mut records = self.read_records()?;
        let before = records.len();
        records.retain(|record| field(record, ID_FIELD) != transaction_id);

        if records.len() == before {
            return Ok(false);
        }

        self.write_records(&records)?;
        info!("Deleted transaction {}", transaction_id);
        Ok(true)
    }
}
