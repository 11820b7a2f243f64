//! # Storage Module
//!
//! Storage traits and their file-based implementation.

pub mod csv;
pub mod traits;

pub use traits::{Connection, SettingsStorage, TransactionStorage};
