//! # CSV Storage Module
//!
//! File-based storage for the fund tracker.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! ├── settings.yaml
//! └── transactions.csv
//! ```
//!
//! ## CSV Format
//!
//! ```csv
//! id,type,category,description,amount,date
//! income-1704412800000-0af3,income,Salary,"January pay",1000,2024-01-05
//! expense-1704844800000-01b2,expense,Food,Groceries,200,2024-01-10
//! ```
//!
//! Writes go to a temporary file that is renamed over the original.

pub mod connection;
pub mod settings_repository;
pub mod transaction_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use settings_repository::SettingsRepository;
pub use transaction_repository::TransactionRepository;
