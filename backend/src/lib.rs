//! # Fund Tracker Backend
//!
//! Domain services and storage for the fund tracker. The command line front
//! end in `main.rs` talks to the domain exclusively through [`Backend`].
//!
//! - `domain`: totals, view derivation, export, formatting and validation
//! - `storage`: storage traits plus the CSV/YAML implementation
//! - `cli`: argument parsing and command handlers

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub mod cli;
pub mod domain;
pub mod storage;

pub use storage::csv::CsvConnection;

/// Main backend struct that wires every service to one data directory
pub struct Backend {
    pub transaction_service: domain::TransactionService<CsvConnection>,
    pub settings_service: domain::SettingsService<CsvConnection>,
    pub dashboard_service: domain::DashboardService<CsvConnection>,
    pub export_service: domain::ExportService<CsvConnection>,
}

impl Backend {
    /// Create a backend rooted at `data_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(data_directory: P) -> Result<Self> {
        let connection = Arc::new(CsvConnection::new(data_directory)?);
        Ok(Self::with_connection(connection))
    }

    /// Create a backend in the default data directory
    pub fn new_default() -> Result<Self> {
        let connection = Arc::new(CsvConnection::new_default()?);
        Ok(Self::with_connection(connection))
    }

    fn with_connection(connection: Arc<CsvConnection>) -> Self {
        let transaction_service = domain::TransactionService::new(connection.clone());
        let settings_service = domain::SettingsService::new(connection.clone());
        let dashboard_service =
            domain::DashboardService::new(transaction_service.clone(), settings_service.clone());
        let export_service = domain::ExportService::new(dashboard_service.clone());

        Backend {
            transaction_service,
            settings_service,
            dashboard_service,
            export_service,
        }
    }
}
