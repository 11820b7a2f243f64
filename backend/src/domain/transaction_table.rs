//! Transaction table formatting for the fund tracker.
//!
//! Turns transactions and totals into display strings: amounts in the user's
//! currency with two decimals, dates in one of a few formats, and a
//! positive/negative hint for styling. Also parses amounts typed by the user.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::{AmountType, Currency, FormattedTransaction, Transaction, TransactionType};

/// Configuration for transaction table display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionTableConfig {
    pub currency: Currency,
    pub date_format: DateFormat,
}

/// Date formatting options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum DateFormat {
    MonthDayYear, // "January 5, 2024"
    ShortDate,    // "01/05/2024"
    Iso,          // "2024-01-05"
}

impl Default for TransactionTableConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            date_format: DateFormat::Iso,
        }
    }
}

#[derive(Clone, Default)]
pub struct TransactionTableService {
    config: TransactionTableConfig,
}

impl TransactionTableService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TransactionTableConfig) -> Self {
        Self { config }
    }

    pub fn with_currency(currency: Currency) -> Self {
        Self::with_config(TransactionTableConfig {
            currency,
            ..TransactionTableConfig::default()
        })
    }

    pub fn format_transactions_for_table(&self, transactions: &[Transaction]) -> Vec<FormattedTransaction> {
        transactions
            .iter()
            .map(|tx| self.format_single_transaction(tx))
            .collect()
    }

    pub fn format_single_transaction(&self, transaction: &Transaction) -> FormattedTransaction {
        FormattedTransaction {
            id: transaction.id.clone(),
            formatted_date: self.format_date(transaction.date),
            description: transaction.description.clone(),
            category: transaction.category.clone(),
            formatted_amount: self.format_signed_amount(transaction),
            amount_type: self.classify(transaction.transaction_type),
        }
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        match self.config.date_format {
            DateFormat::MonthDayYear => {
                format!("{} {}, {}", month_name(date.month()), date.day(), date.year())
            }
            DateFormat::ShortDate => date.format("%m/%d/%Y").to_string(),
            DateFormat::Iso => date.format("%Y-%m-%d").to_string(),
        }
    }

    /// "+₹1000.00" for income, "-₹200.00" for expenses
    pub fn format_signed_amount(&self, transaction: &Transaction) -> String {
        let signed = transaction.signed_amount();
        let sign = if signed < 0.0 { "-" } else { "+" };
        format!("{}{}", sign, self.format_amount(signed.abs()))
    }

    /// Currency symbol and two decimals. Negative totals keep their sign in
    /// front of the symbol.
    pub fn format_amount(&self, amount: f64) -> String {
        let symbol = self.config.currency.symbol();
        if amount < 0.0 {
            format!("-{}{:.2}", symbol, amount.abs())
        } else {
            format!("{}{:.2}", symbol, amount)
        }
    }

    pub fn classify(&self, transaction_type: TransactionType) -> AmountType {
        match transaction_type {
            TransactionType::Income => AmountType::Positive,
            TransactionType::Expense => AmountType::Negative,
        }
    }

    /// Clean and parse an amount typed by the user, e.g. " ₹1,234.50 ".
    /// Any supported currency symbol is ignored.
    pub fn clean_and_parse_amount(&self, input: &str) -> Result<f64, String> {
        let cleaned: String = Currency::ALL
            .iter()
            .fold(input.trim().to_string(), |acc, currency| acc.replace(currency.symbol(), ""))
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();

        if cleaned.is_empty() {
            return Err("Amount is empty".to_string());
        }

        let amount = cleaned
            .parse::<f64>()
            .map_err(|e| format!("Invalid number format: {}", e))?;
        if !amount.is_finite() {
            return Err(format!("Invalid number: {}", cleaned));
        }
        Ok(amount)
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transaction(transaction_type: TransactionType, amount: f64) -> Transaction {
        Transaction {
            id: "1".to_string(),
            transaction_type,
            category: "Salary".to_string(),
            amount,
            description: "Pay".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        }
    }

    #[test]
    fn test_signed_amounts() {
        let service = TransactionTableService::with_currency(Currency::Inr);
        assert_eq!(service.format_signed_amount(&transaction(TransactionType::Income, 1000.0)), "+₹1000.00");
        assert_eq!(service.format_signed_amount(&transaction(TransactionType::Expense, 12.346)), "-₹12.35");
    }

    #[test]
    fn test_format_negative_balance() {
        let service = TransactionTableService::new();
        assert_eq!(service.format_amount(-42.5), "-$42.50");
        assert_eq!(service.format_amount(0.0), "$0.00");
    }

    #[test]
    fn test_date_formats() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let long = TransactionTableService::with_config(TransactionTableConfig {
            currency: Currency::Usd,
            date_format: DateFormat::MonthDayYear,
        });
        let short = TransactionTableService::with_config(TransactionTableConfig {
            currency: Currency::Usd,
            date_format: DateFormat::ShortDate,
        });

        assert_eq!(long.format_date(date), "January 5, 2024");
        assert_eq!(short.format_date(date), "01/05/2024");
        assert_eq!(TransactionTableService::new().format_date(date), "2024-01-05");
    }

    #[test]
    fn test_format_row() {
        let service = TransactionTableService::with_currency(Currency::Eur);
        let row = service.format_single_transaction(&transaction(TransactionType::Expense, 3.0));
        assert_eq!(row.formatted_amount, "-€3.00");
        assert_eq!(row.amount_type, AmountType::Negative);
        assert_eq!(row.category, "Salary");
    }

    #[test]
    fn test_clean_and_parse_amount() {
        let service = TransactionTableService::new();
        assert_eq!(service.clean_and_parse_amount("10.50").unwrap(), 10.50);
        assert_eq!(service.clean_and_parse_amount(" ₹1,234.56 ").unwrap(), 1234.56);
        assert_eq!(service.clean_and_parse_amount("£7").unwrap(), 7.0);
        assert!(service.clean_and_parse_amount("abc").is_err());
        assert!(service.clean_and_parse_amount("   ").is_err());
        assert!(service.clean_and_parse_amount("NaN").is_err());
    }
}
