//! Derivation of the displayed transaction list from a [`ViewState`].
//!
//! The pipeline always runs in the same order: type filter, category filter,
//! search, then a stable sort. Every stage is a no-op when its part of the
//! view state is empty, and the stages combine with logical AND.

use std::cmp::Ordering;

use shared::{SortDirection, SortKey, SortState, Transaction, TransactionFilter, TransactionView, ViewState};

use super::collation;

/// Produce the ordered list of transactions to display.
///
/// The returned view also carries the counts before and after filtering so
/// callers can tell "nothing this month" from "nothing matches".
pub fn compute_view(transactions: &[Transaction], view_state: &ViewState) -> TransactionView {
    let query = view_state.search_query.to_lowercase();

    let mut matched: Vec<Transaction> = transactions
        .iter()
        .filter(|tx| matches_filter(tx, &view_state.filter))
        .filter(|tx| matches_search(tx, &query))
        .cloned()
        .collect();

    sort_transactions(&mut matched, view_state.sort);

    TransactionView {
        total_count: transactions.len(),
        matched_count: matched.len(),
        transactions: matched,
    }
}

/// Type and category filters; an unset filter keeps everything.
pub fn matches_filter(transaction: &Transaction, filter: &TransactionFilter) -> bool {
    let type_matches = filter
        .transaction_type
        .map_or(true, |t| transaction.transaction_type == t);
    let category_matches = filter
        .category
        .as_deref()
        .map_or(true, |c| transaction.category == c);
    type_matches && category_matches
}

/// Case-insensitive substring match against description or category.
/// `lowercase_query` must already be lowercased; empty keeps everything.
pub fn matches_search(transaction: &Transaction, lowercase_query: &str) -> bool {
    lowercase_query.is_empty()
        || transaction.description.to_lowercase().contains(lowercase_query)
        || transaction.category.to_lowercase().contains(lowercase_query)
}

/// Stable sort in place. Records that compare equal keep their relative
/// order in both directions.
pub fn sort_transactions(transactions: &mut [Transaction], sort: SortState) {
    transactions.sort_by(|a, b| {
        let ordering = compare_by_key(a, b, sort.key);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare_by_key(a: &Transaction, b: &Transaction, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::Amount => a.amount.total_cmp(&b.amount),
        SortKey::Description => collation::compare(&a.description, &b.description),
    }
}
