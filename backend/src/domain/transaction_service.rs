//! Transaction service domain logic for the fund tracker.
//!
//! Owns the rules for recording a transaction (the add-transaction form) and
//! hands validated monthly batches to the rest of the domain.

use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use log::{info, warn};
use shared::{CreateTransactionRequest, DeleteTransactionResponse, Transaction, TransactionType};
use std::sync::Arc;
use std::time::SystemTime;

use super::models::transaction::{generate_id, validate_transactions};
use super::transaction_table::TransactionTableService;
use crate::storage::{Connection, TransactionStorage};

/// A single problem with an add-transaction request
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransactionValidationError {
    #[error("Please select a category")]
    MissingCategory,
    #[error("'{category}' is not a valid {transaction_type} category")]
    UnknownCategory {
        category: String,
        transaction_type: TransactionType,
    },
    #[error("Please enter an amount")]
    EmptyAmount,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Amount cannot be negative")]
    NegativeAmount,
    #[error("Please enter a description")]
    EmptyDescription,
    #[error("Date {0} is in the future")]
    FutureDate(NaiveDate),
}

/// Returned through `anyhow` when a request fails validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Transaction rejected: {}", join_messages(.0))]
pub struct TransactionRejected(pub Vec<TransactionValidationError>);

fn join_messages(errors: &[TransactionValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Outcome of validating an add-transaction request
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionValidation {
    pub errors: Vec<TransactionValidationError>,
    pub cleaned_amount: Option<f64>,
    pub date: NaiveDate,
}

impl TransactionValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Clone)]
pub struct TransactionService<C: Connection> {
    transaction_repository: C::TransactionRepository,
    table_service: TransactionTableService,
}

impl<C: Connection> TransactionService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            transaction_repository: connection.create_transaction_repository(),
            table_service: TransactionTableService::new(),
        }
    }

    /// Fetch and validate the transactions recorded in `month`/`year`
    pub fn list_for_month(&self, month: u32, year: i32) -> Result<Vec<Transaction>> {
        if !(1..=12).contains(&month) {
            bail!("Month must be between 1 and 12, got {}", month);
        }

        let transactions = self
            .transaction_repository
            .list_transactions_for_month(month, year)?;
        validate_transactions(&transactions)?;
        Ok(transactions)
    }

    /// Check a request against the form rules as of `today`
    pub fn validate_request(&self, request: &CreateTransactionRequest, today: NaiveDate) -> TransactionValidation {
        let mut errors = Vec::new();

        let category = request.category.trim();
        if category.is_empty() {
            errors.push(TransactionValidationError::MissingCategory);
        } else if !request.transaction_type.categories().contains(&category) {
            errors.push(TransactionValidationError::UnknownCategory {
                category: category.to_string(),
                transaction_type: request.transaction_type,
            });
        }

        let cleaned_amount = if request.amount.trim().is_empty() {
            errors.push(TransactionValidationError::EmptyAmount);
            None
        } else {
            match self.table_service.clean_and_parse_amount(&request.amount) {
                Ok(amount) if amount < 0.0 => {
                    errors.push(TransactionValidationError::NegativeAmount);
                    None
                }
                Ok(amount) => Some(amount),
                Err(parse_error) => {
                    errors.push(TransactionValidationError::InvalidAmount(parse_error));
                    None
                }
            }
        };

        let description = request.description.trim();
        if description.is_empty() {
            errors.push(TransactionValidationError::EmptyDescription);
        }

        let date = request.date.unwrap_or(today);
        if date > today {
            errors.push(TransactionValidationError::FutureDate(date));
        }

        TransactionValidation {
            errors,
            cleaned_amount,
            date,
        }
    }

    /// Validate and store a new transaction dated no later than today
    pub fn create_transaction(&self, request: CreateTransactionRequest) -> Result<Transaction> {
        self.create_transaction_as_of(request, Local::now().date_naive())
    }

    pub fn create_transaction_as_of(&self, request: CreateTransactionRequest, today: NaiveDate) -> Result<Transaction> {
        let validation = self.validate_request(&request, today);
        let amount = match validation.cleaned_amount {
            Some(amount) if validation.is_valid() => amount,
            _ => {
                warn!("Rejected transaction: {}", join_messages(&validation.errors));
                return Err(TransactionRejected(validation.errors).into());
            }
        };

        let transaction = Transaction {
            id: generate_id(request.transaction_type, SystemTime::now())?,
            transaction_type: request.transaction_type,
            category: request.category.trim().to_string(),
            amount,
            description: request.description.trim().to_string(),
            date: validation.date,
        };

        self.transaction_repository.store_transaction(&transaction)?;
        info!(
            "Created {} transaction {} for {:.2}",
            transaction.transaction_type, transaction.id, transaction.amount
        );
        Ok(transaction)
    }

    pub fn delete_transaction(&self, transaction_id: &str) -> Result<DeleteTransactionResponse> {
        let deleted = self.transaction_repository.delete_transaction(transaction_id)?;
        let success_message = if deleted {
            format!("Deleted transaction {}", transaction_id)
        } else {
            format!("Transaction {} not found", transaction_id)
        };
        Ok(DeleteTransactionResponse {
            deleted,
            success_message,
        })
    }
}
