use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};

use crate::error::{BudgetError, Result};
use crate::fmt::csv_amount;
use crate::models::Transaction;

const HEADER: [&str; 6] = ["ID", "Description", "Amount", "Date", "Type", "Category"];

pub fn default_file_name(today: NaiveDate) -> String {
    format!("budget-transactions-{}.csv", today.format("%Y-%m-%d"))
}

/// Render transactions as CSV. Text columns are always quoted; numeric
/// columns only when they contain separators.
pub fn to_csv(transactions: &[Transaction]) -> Result<String> {
    if transactions.is_empty() {
        return Err(BudgetError::NothingToExport);
    }
    let mut out: Vec<u8> = Vec::new();
    {
        let mut header = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .from_writer(&mut out);
        header.write_record(HEADER)?;
        header.flush()?;
    }
    {
        let mut rows = WriterBuilder::new()
            .quote_style(QuoteStyle::NonNumeric)
            .from_writer(&mut out);
        for txn in transactions {
            rows.write_record([
                txn.id.to_string(),
                txn.description.clone(),
                csv_amount(txn.amount),
                txn.date.format("%Y-%m-%d").to_string(),
                txn.txn_type.to_string(),
                txn.category.clone().unwrap_or_default(),
            ])?;
        }
        rows.flush()?;
    }
    String::from_utf8(out).map_err(|e| BudgetError::Other(e.to_string()))
}

pub fn write_csv(transactions: &[Transaction], path: &Path) -> Result<PathBuf> {
    let content = to_csv(transactions)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(path.to_path_buf())
}
