//! Export service domain logic for the fund tracker.
//!
//! Exports exactly what the dashboard shows: the rows of the current view in
//! display order, followed by the month totals.

use anyhow::{anyhow, bail, Context, Result};
use csv::Writer;
use log::{info, warn};
use shared::{
    DashboardRequest, ExportDataRequest, ExportDataResponse, ExportToPathResponse, Totals,
    Transaction,
};
use std::fs;
use std::path::Path;

use super::dashboard_service::DashboardService;
use crate::storage::Connection;

pub const EXPORT_HEADER: [&str; 5] = ["date", "type", "category", "description", "amount"];

#[derive(Clone)]
pub struct ExportService<C: Connection> {
    dashboard_service: DashboardService<C>,
}

impl<C: Connection> ExportService<C> {
    pub fn new(dashboard_service: DashboardService<C>) -> Self {
        Self { dashboard_service }
    }

    /// Render the current view of a month as CSV
    pub fn export_csv(&self, request: &ExportDataRequest) -> Result<ExportDataResponse> {
        let settings = self.dashboard_service.settings_service().get_settings()?;
        if !settings.features.export {
            warn!("Export requested while disabled in settings");
            bail!("Export is disabled in settings");
        }

        let dashboard = self.dashboard_service.load_dashboard(&DashboardRequest {
            month: request.month,
            year: request.year,
            view: request.view.clone(),
        })?;

        let csv_content = render_csv(&dashboard.view.transactions, &dashboard.totals)?;
        let response = ExportDataResponse {
            csv_content,
            filename: export_filename(request.month, request.year),
            transaction_count: dashboard.view.transactions.len(),
        };

        info!(
            "Exported {} transactions ({} bytes) as {}",
            response.transaction_count,
            response.csv_content.len(),
            response.filename
        );
        Ok(response)
    }

    /// Export into `directory`, replacing any previous export of the same month
    pub fn export_to_path(&self, request: &ExportDataRequest, directory: &Path) -> Result<ExportToPathResponse> {
        let export = self.export_csv(request)?;

        fs::create_dir_all(directory)
            .with_context(|| format!("Failed to create export directory {}", directory.display()))?;
        let file_path = directory.join(&export.filename);
        let temp_path = file_path.with_extension("csv.tmp");
        fs::write(&temp_path, &export.csv_content)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &file_path)?;

        let file_path = file_path.to_string_lossy().to_string();
        info!("Wrote export to {}", file_path);
        Ok(ExportToPathResponse {
            file_path,
            transaction_count: export.transaction_count,
        })
    }
}

pub fn export_filename(month: u32, year: i32) -> String {
    format!("transactions_{}_{:02}.csv", year, month)
}

/// Transaction rows, a blank line, then the totals block
pub fn render_csv(transactions: &[Transaction], totals: &Totals) -> Result<String> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADER)?;
    for transaction in transactions {
        let date = transaction.date.format("%Y-%m-%d").to_string();
        let amount = format!("{:.2}", transaction.amount);
        writer.write_record([
            date.as_str(),
            transaction.transaction_type.as_str(),
            transaction.category.as_str(),
            transaction.description.as_str(),
            amount.as_str(),
        ])?;
    }
    let mut buffer = writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV rows: {}", e.error()))?;

    buffer.push(b'\n');

    // Separate writer: the totals block has two columns
    let mut writer = Writer::from_writer(buffer);
    let summary = [
        ("Total Income", totals.total_income),
        ("Total Expenses", totals.total_expenses),
        ("Balance", totals.balance),
        ("To Repay", totals.to_repay),
    ];
    for (label, value) in summary {
        let value = format!("{:.2}", value);
        writer.write_record([label, value.as_str()])?;
    }
    let buffer = writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV totals: {}", e.error()))?;

    Ok(String::from_utf8(buffer)?)
}
