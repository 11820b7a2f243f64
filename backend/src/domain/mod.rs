//! # Domain Module
//!
//! Business logic for the fund tracker, independent of the command line and
//! of the storage format.
//!
//! ## Module Organization
//!
//! - **totals**: income, expense, balance and to-repay aggregation
//! - **transaction_view**: the search/filter/sort pipeline behind the transaction list
//! - **collation**: locale-aware string ordering used when sorting by description
//! - **transaction_service**: validated create/delete and monthly listing
//! - **dashboard_service**: one call producing totals plus the derived view
//! - **export_service**: CSV export of exactly what the dashboard shows
//! - **transaction_table**: amount/date formatting for display
//! - **settings_service**: language, currency and feature flags
//!
//! ## Business Rules
//!
//! - Amounts are stored unsigned; the transaction type carries the sign
//! - Totals cover the whole month, the view only what survives search and filters
//! - A batch with any malformed record is rejected as a whole
//! - Recomputation is always full; nothing is cached between calls

pub mod collation;
pub mod dashboard_service;
pub mod export_service;
pub mod models;
pub mod settings_service;
pub mod totals;
pub mod transaction_service;
pub mod transaction_table;
pub mod transaction_view;

pub use dashboard_service::*;
pub use export_service::*;
pub use settings_service::*;
pub use totals::*;
pub use transaction_service::*;
pub use transaction_table::*;
pub use transaction_view::*;
