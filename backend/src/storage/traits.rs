//! # Storage Traits
//!
//! Storage abstraction used by the domain layer. Services only see these
//! traits, so the CSV implementation can be swapped without touching them.
//! All operations are synchronous.

use anyhow::Result;
use shared::{Transaction, UserSettings};

/// Transaction storage operations
pub trait TransactionStorage: Send + Sync {
    /// Store a new transaction
    fn store_transaction(&self, transaction: &Transaction) -> Result<()>;

    /// Transactions dated within `month`/`year`, in storage order. A
    /// malformed row filed under that month fails the whole listing.
    fn list_transactions_for_month(&self, month: u32, year: i32) -> Result<Vec<Transaction>>;

    /// Delete a single transaction.
    /// Returns true if the transaction was found and deleted, false otherwise
    fn delete_transaction(&self, transaction_id: &str) -> Result<bool>;
}

/// User settings storage operations
pub trait SettingsStorage: Send + Sync {
    /// Load settings, creating the defaults on first use
    fn get_settings(&self) -> Result<UserSettings>;

    /// Replace the stored settings
    fn update_settings(&self, settings: &UserSettings) -> Result<()>;
}

/// A storage backend able to hand out repositories
pub trait Connection: Send + Sync + Clone {
    type TransactionRepository: TransactionStorage + Clone;
    type SettingsRepository: SettingsStorage + Clone;

    fn create_transaction_repository(&self) -> Self::TransactionRepository;

    fn create_settings_repository(&self) -> Self::SettingsRepository;
}
