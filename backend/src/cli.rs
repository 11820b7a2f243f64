use anyhow::{anyhow, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::debug;
use shared::{
    CreateTransactionRequest, Currency, DashboardFeatures, DashboardRequest, EmptyViewReason,
    ExportDataRequest, Language, SortDirection, SortKey, SortState, TransactionType, ViewState,
};
use std::path::PathBuf;

use crate::domain::{month_name, DateFormat, TransactionTableConfig, TransactionTableService};
use crate::Backend;

#[derive(Parser, Debug)]
#[command(name = "fund-tracker", version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Directory holding transactions.csv and settings.yaml
    #[arg(long, env = "FUND_TRACKER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show totals and the transaction list for a month
    #[command(name = "summary")]
    Summary(ShowSummary),
    /// Record a transaction
    #[command(name = "add")]
    Add(AddTransaction),
    /// Delete a transaction by id
    #[command(name = "delete")]
    Delete(DeleteTransaction),
    /// Export the transaction list of a month as CSV
    #[command(name = "export")]
    Export(ExportTransactions),
    /// Show or change settings
    #[command(name = "settings")]
    Settings(UpdateSettings),
}

impl Command {
    pub fn run(self, backend: &Backend) -> Result<()> {
        match self {
            Command::Summary(cmd) => cmd.run(backend),
            Command::Add(cmd) => cmd.run(backend),
            Command::Delete(cmd) => cmd.run(backend),
            Command::Export(cmd) => cmd.run(backend),
            Command::Settings(cmd) => cmd.run(backend),
        }
    }
}

/// Month selection plus search, filter and sort options
#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Month number, defaults to the current month
    #[arg(short, long)]
    pub month: Option<u32>,
    /// Year, defaults to the current year
    #[arg(short, long)]
    pub year: Option<i32>,
    /// Case-insensitive text matched against description and category
    #[arg(short, long)]
    pub search: Option<String>,
    /// Only show income or expense
    #[arg(short = 't', long = "type")]
    pub transaction_type: Option<TransactionType>,
    /// Only show one category
    #[arg(short, long)]
    pub category: Option<String>,
    /// date, amount or description
    #[arg(long, default_value = "date")]
    pub sort: SortKey,
    /// asc or desc
    #[arg(long, default_value = "desc")]
    pub direction: SortDirection,
}

impl ViewArgs {
    fn month_and_year(&self) -> (u32, i32) {
        let today = Local::now().date_naive();
        (self.month.unwrap_or(today.month()), self.year.unwrap_or(today.year()))
    }

    fn view_state(&self) -> ViewState {
        let mut view = ViewState::default();
        if let Some(query) = &self.search {
            view.set_search(query.clone());
        }
        view.set_type_filter(self.transaction_type);
        view.set_category_filter(self.category.clone());
        view.sort = SortState {
            key: self.sort,
            direction: self.direction,
        };
        debug!("View state from arguments: {:?}", view);
        view
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DateStyle {
    Iso,
    Short,
    Long,
}

impl From<DateStyle> for DateFormat {
    fn from(style: DateStyle) -> Self {
        match style {
            DateStyle::Iso => DateFormat::Iso,
            DateStyle::Short => DateFormat::ShortDate,
            DateStyle::Long => DateFormat::MonthDayYear,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowSummary {
    #[command(flatten)]
    pub view: ViewArgs,
    #[arg(long, value_enum, default_value = "iso")]
    pub dates: DateStyle,
    /// Print the dashboard as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ShowSummary {
    pub fn run(self, backend: &Backend) -> Result<()> {
        let (month, year) = self.view.month_and_year();
        let view_state = self.view.view_state();
        let dashboard = backend.dashboard_service.load_dashboard(&DashboardRequest {
            month,
            year,
            view: view_state.clone(),
        })?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&dashboard)?);
            return Ok(());
        }

        let table = TransactionTableService::with_config(TransactionTableConfig {
            currency: dashboard.currency,
            date_format: self.dates.into(),
        });

        println!("{} {}", month_name(month), year);
        println!("{:<16}{:>14}", "Income", table.format_amount(dashboard.totals.total_income));
        println!("{:<16}{:>14}", "Expenses", table.format_amount(dashboard.totals.total_expenses));
        println!("{:<16}{:>14}", "Balance", table.format_amount(dashboard.totals.balance));
        println!("{:<16}{:>14}", "To Repay", table.format_amount(dashboard.totals.to_repay));
        println!();

        match dashboard.view.empty_reason() {
            Some(EmptyViewReason::NoTransactions) => {
                println!("No transactions recorded for {} {}", month_name(month), year);
                return Ok(());
            }
            Some(EmptyViewReason::NoMatches) if view_state.is_searching() => {
                println!("No transactions match \"{}\"", view_state.search_query);
                return Ok(());
            }
            Some(EmptyViewReason::NoMatches) => {
                println!("No transactions match the current filters");
                return Ok(());
            }
            None => {}
        }

        if view_state.has_active_filters() {
            println!(
                "Showing {} of {} transactions",
                dashboard.view.matched_count, dashboard.view.total_count
            );
        } else {
            println!("{} transactions", dashboard.view.total_count);
        }
        println!(
            "{:<20}\t{:<18}\t{:<14}\t{:>14}\t{}",
            "Date", "Category", "Id", "Amount", "Description"
        );
        println!("{:-<100}", "-");
        for row in table.format_transactions_for_table(&dashboard.view.transactions) {
            println!(
                "{:<20}\t{:<18}\t{:<14}\t{:>14}\t{}",
                row.formatted_date, row.category, row.id, row.formatted_amount, row.description
            );
        }

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddTransaction {
    #[arg(short = 't', long = "type")]
    pub transaction_type: TransactionType,
    #[arg(short, long)]
    pub category: String,
    /// Amount as typed, e.g. "1,250.00" or "₹300"
    #[arg(short, long, allow_hyphen_values = true)]
    pub amount: String,
    #[arg(short, long)]
    pub description: String,
    /// Defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

impl AddTransaction {
    pub fn run(self, backend: &Backend) -> Result<()> {
        let transaction = backend.transaction_service.create_transaction(CreateTransactionRequest {
            transaction_type: self.transaction_type,
            category: self.category,
            amount: self.amount,
            description: self.description,
            date: self.date,
        })?;

        let currency = backend.settings_service.get_settings()?.currency;
        let table = TransactionTableService::with_currency(currency);
        println!(
            "Added {} {} on {} ({})",
            transaction.transaction_type,
            table.format_signed_amount(&transaction),
            table.format_date(transaction.date),
            transaction.id
        );
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteTransaction {
    pub id: String,
}

impl DeleteTransaction {
    pub fn run(self, backend: &Backend) -> Result<()> {
        let response = backend.transaction_service.delete_transaction(&self.id)?;
        if !response.deleted {
            return Err(anyhow!(response.success_message));
        }
        println!("{}", response.success_message);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ExportTransactions {
    #[command(flatten)]
    pub view: ViewArgs,
    /// Directory to write the file into; prints to stdout when omitted
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

impl ExportTransactions {
    pub fn run(self, backend: &Backend) -> Result<()> {
        let (month, year) = self.view.month_and_year();
        let request = ExportDataRequest {
            month,
            year,
            view: self.view.view_state(),
        };

        match self.out {
            Some(directory) => {
                let response = backend.export_service.export_to_path(&request, &directory)?;
                println!(
                    "Exported {} transactions to {}",
                    response.transaction_count, response.file_path
                );
            }
            None => {
                let response = backend.export_service.export_csv(&request)?;
                print!("{}", response.csv_content);
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Feature {
    Search,
    Filter,
    Sort,
    Export,
}

fn set_feature(features: &mut DashboardFeatures, feature: Feature, enabled: bool) {
    match feature {
        Feature::Search => features.search = enabled,
        Feature::Filter => features.filter = enabled,
        Feature::Sort => features.sort = enabled,
        Feature::Export => features.export = enabled,
    }
}

#[derive(Args, Debug)]
pub struct UpdateSettings {
    /// USD, EUR, GBP, JPY or INR
    #[arg(long)]
    pub currency: Option<Currency>,
    /// en, es, fr or de
    #[arg(long)]
    pub language: Option<Language>,
    #[arg(long, value_enum)]
    pub enable: Vec<Feature>,
    #[arg(long, value_enum)]
    pub disable: Vec<Feature>,
}

impl UpdateSettings {
    pub fn run(self, backend: &Backend) -> Result<()> {
        let features = if self.enable.is_empty() && self.disable.is_empty() {
            None
        } else {
            let mut features = backend.settings_service.get_settings()?.features;
            for feature in self.enable {
                set_feature(&mut features, feature, true);
            }
            for feature in self.disable {
                set_feature(&mut features, feature, false);
            }
            Some(features)
        };

        let settings = backend
            .settings_service
            .update_settings(self.language, self.currency, features)?;

        println!("Language: {} ({})", settings.language.name(), settings.language.code());
        println!(
            "Currency: {} ({} {})",
            settings.currency.name(),
            settings.currency.code(),
            settings.currency.symbol()
        );
        let on_off = |enabled: bool| if enabled { "on" } else { "off" };
        println!("Search:   {}", on_off(settings.features.search));
        println!("Filter:   {}", on_off(settings.features.filter));
        println!("Sort:     {}", on_off(settings.features.sort));
        println!("Export:   {}", on_off(settings.features.export));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_arguments_build_view_state() {
        let cli = Cli::try_parse_from([
            "fund-tracker",
            "--data-dir",
            "/tmp/funds",
            "summary",
            "--month",
            "1",
            "--year",
            "2024",
            "--type",
            "expense",
            "--sort",
            "amount",
            "--search",
            "Repay",
        ])
        .unwrap();

        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/funds")));
        let Command::Summary(summary) = cli.command else {
            panic!("expected summary command");
        };
        assert_eq!(summary.view.month_and_year(), (1, 2024));

        let view = summary.view.view_state();
        assert_eq!(view.filter.transaction_type, Some(TransactionType::Expense));
        assert_eq!(view.filter.category, None);
        assert_eq!(view.search_query, "Repay");
        assert_eq!(view.sort, SortState { key: SortKey::Amount, direction: SortDirection::Desc });
    }

    #[test]
    fn test_add_accepts_negative_amount_for_validation() {
        let cli = Cli::try_parse_from([
            "fund-tracker", "add", "--type", "expense", "--category", "Food", "--amount", "-5", "--description", "x",
        ])
        .unwrap();
        let Command::Add(add) = cli.command else {
            panic!("expected add command");
        };
        assert_eq!(add.amount, "-5");
    }

    #[test]
    fn test_rejects_unknown_sort_key() {
        assert!(Cli::try_parse_from(["fund-tracker", "summary", "--sort", "size"]).is_err());
    }

    #[test]
    fn test_set_feature() {
        let mut features = DashboardFeatures::default();
        set_feature(&mut features, Feature::Export, false);
        set_feature(&mut features, Feature::Sort, false);
        assert_eq!(features, DashboardFeatures { search: true, filter: true, sort: false, export: false });
    }
}
