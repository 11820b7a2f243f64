//! Dashboard orchestration: fetch a month, validate it, then compute totals
//! and the derived transaction view in one pass.
//!
//! Feature flags from the user settings are applied by masking the view
//! state before it reaches [`compute_view`]; there is only one pipeline.

use anyhow::Result;
use log::{debug, info};
use shared::{Currency, DashboardFeatures, DashboardRequest, DashboardResponse, SortState, Transaction, ViewState};

use super::settings_service::SettingsService;
use super::totals::compute_totals;
use super::transaction_service::TransactionService;
use super::transaction_view::compute_view;
use crate::storage::Connection;

/// The view state with disabled features switched off
pub fn effective_view_state(view_state: &ViewState, features: DashboardFeatures) -> ViewState {
    let mut effective = view_state.clone();
    if !features.search {
        effective.search_query.clear();
    }
    if !features.filter {
        effective.filter = Default::default();
    }
    if !features.sort {
        effective.sort = SortState::default();
    }
    effective
}

#[derive(Clone)]
pub struct DashboardService<C: Connection> {
    transaction_service: TransactionService<C>,
    settings_service: SettingsService<C>,
}

impl<C: Connection> DashboardService<C> {
    pub fn new(transaction_service: TransactionService<C>, settings_service: SettingsService<C>) -> Self {
        Self {
            transaction_service,
            settings_service,
        }
    }

    pub fn settings_service(&self) -> &SettingsService<C> {
        &self.settings_service
    }

    pub fn load_dashboard(&self, request: &DashboardRequest) -> Result<DashboardResponse> {
        let settings = self.settings_service.get_settings()?;
        let transactions = self
            .transaction_service
            .list_for_month(request.month, request.year)?;

        let response = build_dashboard(request, &transactions, &settings.features, settings.currency);
        info!(
            "Dashboard {}/{}: {} of {} transactions shown",
            request.month, request.year, response.view.matched_count, response.view.total_count
        );
        Ok(response)
    }
}

/// Totals over the whole month plus the filtered, sorted view
pub fn build_dashboard(
    request: &DashboardRequest,
    transactions: &[Transaction],
    features: &DashboardFeatures,
    currency: Currency,
) -> DashboardResponse {
    let view_state = effective_view_state(&request.view, *features);
    debug!("Effective view state: {:?}", view_state);

    DashboardResponse {
        month: request.month,
        year: request.year,
        currency,
        totals: compute_totals(transactions),
        view: compute_view(transactions, &view_state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::{sample_transaction, TestEnvironment};
    use crate::storage::TransactionStorage;
    use shared::{Currency, SortKey, Totals, TransactionType};

    fn january() -> Vec<Transaction> {
        vec![
            sample_transaction("salary", TransactionType::Income, "Salary", 1000.0, "2024-01-05"),
            sample_transaction("food", TransactionType::Expense, "Food", 200.0, "2024-01-10"),
            sample_transaction("loan", TransactionType::Expense, "To Repay", 150.0, "2024-01-15"),
        ]
    }

    fn request(view: ViewState) -> DashboardRequest {
        DashboardRequest { month: 1, year: 2024, view }
    }

    #[test]
    fn test_totals_ignore_view_filters() {
        let mut view = ViewState::default();
        view.set_search("repay");

        let response = build_dashboard(&request(view), &january(), &DashboardFeatures::default(), Currency::Inr);

        assert_eq!(response.totals, Totals { total_income: 1000.0, total_expenses: 350.0, balance: 650.0, to_repay: 150.0 });
        assert_eq!(response.view.transactions.len(), 1);
        assert_eq!(response.view.transactions[0].id, "loan");
    }

    #[test]
    fn test_disabled_features_are_masked() {
        let mut view = ViewState::default();
        view.set_search("repay");
        view.set_type_filter(Some(TransactionType::Income));
        view.toggle_sort(SortKey::Amount);

        let features = DashboardFeatures { search: false, filter: false, sort: false, export: true };
        let effective = effective_view_state(&view, features);
        assert_eq!(effective, ViewState::default());

        let response = build_dashboard(&request(view), &january(), &features, Currency::Usd);
        let ids: Vec<&str> = response.view.transactions.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["loan", "food", "salary"]);
    }

    fn busy_view() -> ViewState {
        let mut view = ViewState::default();
        view.set_search("repay");
        view.set_type_filter(Some(TransactionType::Expense));
        view.set_category_filter(Some("To Repay".to_string()));
        view.toggle_sort(SortKey::Amount);
        view
    }

    #[test]
    fn test_disabling_search_keeps_filter_and_sort() {
        let features = DashboardFeatures { search: false, ..Default::default() };
        let effective = effective_view_state(&busy_view(), features);

        assert_eq!(effective.search_query, "");
        assert_eq!(effective.filter, busy_view().filter);
        assert_eq!(effective.sort, busy_view().sort);
    }

    #[test]
    fn test_disabling_filter_keeps_search_and_sort() {
        let features = DashboardFeatures { filter: false, ..Default::default() };
        let effective = effective_view_state(&busy_view(), features);

        assert!(!effective.filter.is_active());
        assert_eq!(effective.search_query, "repay");
        assert_eq!(effective.sort, busy_view().sort);
    }

    #[test]
    fn test_disabling_sort_keeps_search_and_filter() {
        let features = DashboardFeatures { sort: false, ..Default::default() };
        let effective = effective_view_state(&busy_view(), features);

        assert_eq!(effective.sort, SortState::default());
        assert_eq!(effective.search_query, "repay");
        assert_eq!(effective.filter, busy_view().filter);

        let mut by_amount = ViewState::default();
        by_amount.toggle_sort(SortKey::Amount);
        by_amount.toggle_sort(SortKey::Amount);
        let response = build_dashboard(&request(by_amount), &january(), &features, Currency::Usd);
        let ids: Vec<&str> = response.view.transactions.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["loan", "food", "salary"]);
    }

    #[test]
    fn test_load_dashboard_from_storage() {
        let env = TestEnvironment::new().unwrap();
        let connection = env.shared_connection();
        let repo = env.connection.create_transaction_repository();
        for tx in january() {
            repo.store_transaction(&tx).unwrap();
        }
        repo.store_transaction(&sample_transaction("feb", TransactionType::Income, "Salary", 5.0, "2024-02-01")).unwrap();

        let service = DashboardService::new(
            TransactionService::new(connection.clone()),
            SettingsService::new(connection),
        );
        let mut view = ViewState::default();
        view.set_type_filter(Some(TransactionType::Expense));
        view.toggle_sort(SortKey::Amount);

        let response = service.load_dashboard(&request(view)).unwrap();
        let amounts: Vec<f64> = response.view.transactions.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![200.0, 150.0]);
        assert_eq!(response.view.total_count, 3);
        assert_eq!(response.totals.total_income, 1000.0);
        assert_eq!(response.currency, Currency::Usd);
    }
}
