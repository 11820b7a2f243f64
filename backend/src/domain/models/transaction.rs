//! Domain rules for a single transaction record.
use shared::{Transaction, TransactionType};
use std::time::{SystemTime, SystemTimeError, UNIX_EPOCH};

/// A record that cannot take part in totals or the derived view.
///
/// Any one of these rejects the whole batch it came in; totals are never
/// computed over a partially valid list.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidRecordError {
    #[error("Transaction {id} has a non-finite amount")]
    NonFiniteAmount { id: String },
    #[error("Transaction {id} has a negative amount ({amount})")]
    NegativeAmount { id: String, amount: f64 },
    #[error("Transaction {id} has an unparseable amount '{value}'")]
    UnparseableAmount { id: String, value: String },
    #[error("Transaction {id} has an unparseable date '{value}'")]
    UnparseableDate { id: String, value: String },
    #[error("Transaction {id} has an unknown type '{value}'")]
    UnknownType { id: String, value: String },
}

/// Check a single record's amount. Dates and types are already typed by the
/// time a `Transaction` exists, so only the amount can still be malformed.
pub fn validate_transaction(transaction: &Transaction) -> Result<(), InvalidRecordError> {
    if !transaction.amount.is_finite() {
        return Err(InvalidRecordError::NonFiniteAmount {
            id: transaction.id.clone(),
        });
    }
    if transaction.amount < 0.0 {
        return Err(InvalidRecordError::NegativeAmount {
            id: transaction.id.clone(),
            amount: transaction.amount,
        });
    }
    Ok(())
}

/// Validate a batch, failing on the first malformed record
pub fn validate_transactions(transactions: &[Transaction]) -> Result<(), InvalidRecordError> {
    transactions.iter().try_for_each(validate_transaction)
}

/// Generate a fresh transaction ID for `transaction_type` at time `now`.
pub fn generate_id(transaction_type: TransactionType, now: SystemTime) -> Result<String, SystemTimeError> {
    let elapsed = now.duration_since(UNIX_EPOCH)?;
    let timestamp_ms = elapsed.as_millis() as u64;
    // Sub-millisecond part of the clock separates IDs created in the same millisecond
    let suffix = (elapsed.subsec_nanos() % 0x1_0000) as u16;
    Ok(Transaction::generate_id(transaction_type, timestamp_ms, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn transaction(id: &str, amount: f64) -> Transaction {
        Transaction {
            id: id.to_string(),
            transaction_type: TransactionType::Expense,
            category: "Food".to_string(),
            amount,
            description: "Groceries".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        }
    }

    #[test]
    fn test_valid_amounts_pass() {
        assert!(validate_transaction(&transaction("a", 0.0)).is_ok());
        assert!(validate_transaction(&transaction("b", 19.99)).is_ok());
    }

    #[test]
    fn test_nan_and_infinite_amounts_are_rejected() {
        assert_eq!(
            validate_transaction(&transaction("nan", f64::NAN)),
            Err(InvalidRecordError::NonFiniteAmount { id: "nan".to_string() })
        );
        assert!(matches!(
            validate_transaction(&transaction("inf", f64::INFINITY)),
            Err(InvalidRecordError::NonFiniteAmount { .. })
        ));
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        assert!(matches!(
            validate_transaction(&transaction("neg", -5.0)),
            Err(InvalidRecordError::NegativeAmount { amount, .. }) if amount == -5.0
        ));
    }

    #[test]
    fn test_batch_reports_first_bad_record() {
        let batch = vec![
            transaction("ok", 10.0),
            transaction("first", -1.0),
            transaction("second", f64::NAN),
        ];
        let err = validate_transactions(&batch).unwrap_err();
        assert_eq!(err, InvalidRecordError::NegativeAmount { id: "first".to_string(), amount: -1.0 });
    }

    #[test]
    fn test_generate_id_uses_clock() {
        let now = UNIX_EPOCH + Duration::from_millis(1_704_412_800_123);
        let id = generate_id(TransactionType::Expense, now).unwrap();
        // 123ms of sub-second nanos, modulo 0x10000
        assert_eq!(id, "expense-1704412800123-d4c0");
    }
}
