use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category whose expenses are tracked separately as money still owed back.
pub const TO_REPAY_CATEGORY: &str = "To Repay";

/// Categories offered when recording an expense
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transportation",
    "Utilities",
    "Entertainment",
    "Shopping",
    "Healthcare",
    "Loan",
    TO_REPAY_CATEGORY,
    "Other",
];

/// Categories offered when recording income
pub const INCOME_CATEGORIES: &[&str] = &["Salary", "Freelance", "Investment", "Other"];

/// Transaction ID in format: "<income|expense>-<epoch_millis>-<hex suffix>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Whether money came in or went out
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Free-form category label, e.g. "Salary" or "To Repay"
    pub category: String,
    /// Non-negative amount in currency units; the sign comes from `transaction_type`
    pub amount: f64,
    /// Description of the transaction
    pub description: String,
    /// Calendar date the transaction happened on
    pub date: NaiveDate,
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money received
    Income,
    /// Money spent
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// Categories a transaction of this type may be recorded under
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            TransactionType::Income => INCOME_CATEGORIES,
            TransactionType::Expense => EXPENSE_CATEGORIES,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!("Unknown transaction type: {}", other)),
        }
    }
}

/// Aggregate summary shown on the dashboard cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_income: f64,
    pub total_expenses: f64,
    /// Always `total_income - total_expenses`
    pub balance: f64,
    /// Expenses recorded under the "To Repay" category
    pub to_repay: f64,
}

/// Column the transaction list is ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Amount,
    Description,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "amount" => Ok(SortKey::Amount),
            "description" => Ok(SortKey::Description),
            other => Err(format!("Unknown sort key: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("Unknown sort direction: {}", other)),
        }
    }
}

/// Active sort column and direction. Defaults to newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Type and category filters. `None` means the filter is off.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub transaction_type: Option<TransactionType>,
    pub category: Option<String>,
}

impl TransactionFilter {
    pub fn is_active(&self) -> bool {
        self.transaction_type.is_some() || self.category.is_some()
    }
}

/// Search, filter and sort state controlling which transactions are shown
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub search_query: String,
    pub filter: TransactionFilter,
    pub sort: SortState,
}

impl ViewState {
    /// Clicking the active sort key flips its direction; clicking another key
    /// makes it active in descending order.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort.key == key {
            self.sort.direction = self.sort.direction.reversed();
        } else {
            self.sort = SortState {
                key,
                direction: SortDirection::Desc,
            };
        }
    }

    /// Clear type, category and search. Sorting is kept.
    pub fn reset_filters(&mut self) {
        self.filter = TransactionFilter::default();
        self.search_query.clear();
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn set_type_filter(&mut self, transaction_type: Option<TransactionType>) {
        self.filter.transaction_type = transaction_type;
    }

    /// Empty strings are treated as "no category filter"
    pub fn set_category_filter(&mut self, category: Option<String>) {
        self.filter.category = category.filter(|c| !c.is_empty());
    }

    pub fn is_searching(&self) -> bool {
        !self.search_query.is_empty()
    }

    pub fn has_active_filters(&self) -> bool {
        self.filter.is_active() || self.is_searching()
    }
}

/// Why a derived view came out empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptyViewReason {
    /// Nothing was recorded for the selected month
    NoTransactions,
    /// Records exist but none survived search or filters
    NoMatches,
}

/// Filtered and sorted transactions ready for display or export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionView {
    pub transactions: Vec<Transaction>,
    /// Number of records before any filter or search was applied
    pub total_count: usize,
    /// Number of records left after filtering and searching
    pub matched_count: usize,
}

impl TransactionView {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn empty_reason(&self) -> Option<EmptyViewReason> {
        if !self.transactions.is_empty() {
            None
        } else if self.total_count == 0 {
            Some(EmptyViewReason::NoTransactions)
        } else {
            Some(EmptyViewReason::NoMatches)
        }
    }
}

/// Which dashboard capabilities are switched on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardFeatures {
    pub search: bool,
    pub filter: bool,
    pub sort: bool,
    pub export: bool,
}

impl Default for DashboardFeatures {
    fn default() -> Self {
        Self {
            search: true,
            filter: true,
            sort: true,
            export: true,
        }
    }
}

/// Display currency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Inr,
}

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Inr,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Inr => "INR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
            Currency::Inr => "₹",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Usd => "US Dollar",
            Currency::Eur => "Euro",
            Currency::Gbp => "British Pound",
            Currency::Jpy => "Japanese Yen",
            Currency::Inr => "Indian Rupee",
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| format!("Unsupported currency: {}", s))
    }
}

/// Interface language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Fr => "French",
            Language::De => "German",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            "fr" => Ok(Language::Fr),
            "de" => Ok(Language::De),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}

/// Per-user preferences persisted next to the transaction data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub features: DashboardFeatures,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub transaction_type: TransactionType,
    pub category: String,
    /// Raw amount input as typed by the user
    pub amount: String,
    pub description: String,
    /// Defaults to today when not provided
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteTransactionResponse {
    pub deleted: bool,
    pub success_message: String,
}

/// Request for the monthly dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardRequest {
    pub month: u32,
    pub year: i32,
    #[serde(default)]
    pub view: ViewState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub month: u32,
    pub year: i32,
    pub currency: Currency,
    /// Totals over the whole month, independent of search and filters
    pub totals: Totals,
    pub view: TransactionView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDataRequest {
    pub month: u32,
    pub year: i32,
    #[serde(default)]
    pub view: ViewState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDataResponse {
    pub csv_content: String,
    pub filename: String,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathResponse {
    pub file_path: String,
    pub transaction_count: usize,
}

/// Represents a formatted transaction for display purposes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedTransaction {
    pub id: String,
    pub formatted_date: String,
    pub description: String,
    pub category: String,
    pub formatted_amount: String,
    pub amount_type: AmountType,
}

/// Styling hint for an amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountType {
    Positive,
    Negative,
}

impl Transaction {
    /// Generate a transaction ID from its type, a millisecond timestamp and a hex suffix.
    pub fn generate_id(transaction_type: TransactionType, timestamp_ms: u64, suffix: u16) -> String {
        format!("{}-{}-{:04x}", transaction_type.as_str(), timestamp_ms, suffix)
    }

    /// Amount with the sign implied by the transaction type
    pub fn signed_amount(&self) -> f64 {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}
