use std::path::Path;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{BudgetError, Result};
use crate::models::{ChartKind, Transaction};
use crate::settings::normalize_currency;
use crate::store::parse_records;

/// Backup document: every transaction plus the display preferences.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup<'a> {
    pub transactions: &'a [Transaction],
    pub currency: &'a str,
    pub chart_type: ChartKind,
    pub backup_date: String,
}

impl<'a> Backup<'a> {
    pub fn new(
        transactions: &'a [Transaction],
        currency: &'a str,
        chart_type: ChartKind,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            transactions,
            currency,
            chart_type,
            backup_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// What a backup file restores. Preferences are `None` when absent or unusable.
#[derive(Debug)]
pub struct Restored {
    pub transactions: Vec<Transaction>,
    pub currency: Option<String>,
    pub chart_type: Option<ChartKind>,
    pub backup_date: Option<String>,
}

pub fn default_file_name(today: NaiveDate) -> String {
    format!("budget-tracker-backup-{}.json", today.format("%Y-%m-%d"))
}

pub fn write_backup(backup: &Backup<'_>, path: &Path) -> Result<u64> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, backup.to_json()?)?;
    Ok(std::fs::metadata(path)?.len())
}

pub fn read_backup(path: &Path) -> Result<Restored> {
    let content = std::fs::read_to_string(path)?;
    parse_backup(&content)
}

pub fn parse_backup(content: &str) -> Result<Restored> {
    let mut doc: Value = serde_json::from_str(content)
        .map_err(|e| BudgetError::InvalidBackup(format!("not valid JSON ({e})")))?;
    let obj = doc
        .as_object_mut()
        .ok_or_else(|| BudgetError::InvalidBackup("expected a JSON object".to_string()))?;

    let records = match obj.remove("transactions") {
        Some(Value::Array(records)) => records,
        Some(_) => {
            return Err(BudgetError::InvalidBackup(
                "\"transactions\" must be an array".to_string(),
            ))
        }
        None => {
            return Err(BudgetError::InvalidBackup(
                "missing \"transactions\"".to_string(),
            ))
        }
    };

    let currency = obj
        .get("currency")
        .and_then(Value::as_str)
        .and_then(|code| match normalize_currency(code) {
            Ok(code) => Some(code),
            Err(e) => {
                warn!(error = %e, "ignoring backup currency");
                None
            }
        });

    let chart_type = obj
        .get("chartType")
        .and_then(Value::as_str)
        .and_then(|kind| match kind.parse::<ChartKind>() {
            Ok(kind) => Some(kind),
            Err(e) => {
                warn!(error = %e, "ignoring backup chart type");
                None
            }
        });

    let backup_date = obj
        .get("backupDate")
        .and_then(Value::as_str)
        .map(String::from);

    Ok(Restored {
        transactions: parse_records(records),
        currency,
        chart_type,
        backup_date,
    })
}
