//! Monthly totals for the dashboard summary cards.
//!
//! Sums fold left to right over the input in index order, so the same list
//! always produces bit-identical floating point results. No rounding happens
//! here; formatting to two decimals belongs to the display layer.

use shared::{Totals, Transaction, TransactionType, TO_REPAY_CATEGORY};

/// Compute income, expenses, balance and the amount still to repay.
///
/// Amounts are assumed to be finite and non-negative; callers validate
/// batches with [`validate_transactions`](super::models::transaction::validate_transactions)
/// before they get here.
pub fn compute_totals(transactions: &[Transaction]) -> Totals {
    let (total_income, total_expenses, to_repay) =
        transactions
            .iter()
            .fold((0.0, 0.0, 0.0), |(income, expenses, to_repay), tx| {
                match tx.transaction_type {
                    TransactionType::Income => (income + tx.amount, expenses, to_repay),
                    TransactionType::Expense if tx.category == TO_REPAY_CATEGORY => {
                        (income, expenses + tx.amount, to_repay + tx.amount)
                    }
                    TransactionType::Expense => (income, expenses + tx.amount, to_repay),
                }
            });

    Totals {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        to_repay,
    }
}
