use anyhow::{anyhow, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use super::{SettingsRepository, TransactionRepository};
use crate::storage::traits::Connection;

pub const TRANSACTIONS_FILE: &str = "transactions.csv";
pub const SETTINGS_FILE: &str = "settings.yaml";
pub const TRANSACTIONS_HEADER: [&str; 6] = ["id", "type", "category", "description", "amount", "date"];

/// CsvConnection manages the data directory and the files inside it
#[derive(Clone, Debug)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection, creating the base directory if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in `~/Documents/Fund Tracker`, or `~/Fund Tracker`
    /// when there is no documents folder
    pub fn new_default() -> Result<Self> {
        Self::new(Self::default_data_directory()?)
    }

    pub fn default_data_directory() -> Result<PathBuf> {
        let parent = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(parent.join("Fund Tracker"))
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn transactions_file_path(&self) -> PathBuf {
        self.base_directory.join(TRANSACTIONS_FILE)
    }

    pub fn settings_file_path(&self) -> PathBuf {
        self.base_directory.join(SETTINGS_FILE)
    }

    /// Ensure the transactions CSV exists with its header row
    pub fn ensure_transactions_file_exists(&self) -> Result<()> {
        let file_path = self.transactions_file_path();
        if !file_path.exists() {
            fs::write(&file_path, format!("{}\n", TRANSACTIONS_HEADER.join(",")))?;
            info!("Created transactions file: {}", file_path.display());
        }
        Ok(())
    }
}

impl Connection for CsvConnection {
    type TransactionRepository = TransactionRepository;
    type SettingsRepository = SettingsRepository;

    fn create_transaction_repository(&self) -> Self::TransactionRepository {
        TransactionRepository::new(self.clone())
    }

    fn create_settings_repository(&self) -> Self::SettingsRepository {
        SettingsRepository::new(self.clone())
    }
}
