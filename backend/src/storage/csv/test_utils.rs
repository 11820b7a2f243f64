//! Test utilities for storage and service tests.
//!
//! `TestEnvironment` owns a temporary data directory that is removed when the
//! environment is dropped, even if the test panics.

use anyhow::Result;
use chrono::NaiveDate;
use shared::{Transaction, TransactionType};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use super::connection::CsvConnection;

pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("fund_tracker_test_")?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn shared_connection(&self) -> Arc<CsvConnection> {
        Arc::new(self.connection.clone())
    }
}

/// Build a transaction with an ISO date string, panicking on bad test input
pub fn sample_transaction(
    id: &str,
    transaction_type: TransactionType,
    category: &str,
    amount: f64,
    date: &str,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        transaction_type,
        category: category.to_string(),
        amount,
        description: format!("{} {}", category, id),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid test date"),
    }
}
