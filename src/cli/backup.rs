use std::path::{Path, PathBuf};

use chrono::{Local, Utc};
use tracing::info;

use crate::backup::{default_file_name, read_backup, write_backup, Backup};
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::notify::{Notification, NotificationSink, TerminalNotifier};
use crate::settings::{get_data_dir, load_settings, save_settings, store_path};
use crate::store::TransactionStore;

pub fn backup(output: Option<String>) -> Result<()> {
    let settings = load_settings();
    let store = TransactionStore::open(store_path())?;

    let dest_path = match output {
        Some(p) => PathBuf::from(p),
        None => get_data_dir()
            .join("backups")
            .join(default_file_name(Local::now().date_naive())),
    };

    let doc = Backup::new(
        store.transactions(),
        &settings.currency,
        settings.chart_type,
        Utc::now(),
    );
    let size = write_backup(&doc, &dest_path)?;

    println!("Backup saved to {}", dest_path.display());
    println!("Transactions: {}", store.len());
    println!("Size: {}", format_bytes(size));
    Ok(())
}

pub fn restore(file: &str, yes: bool) -> Result<()> {
    let restored = read_backup(Path::new(file))?;
    let mut store = TransactionStore::open(store_path())?;

    if let Some(date) = &restored.backup_date {
        println!("Backup from {date}");
    }
    if !yes
        && !store.is_empty()
        && !super::confirm(&format!(
            "Replace {} transactions with {} from the backup?",
            store.len(),
            restored.transactions.len()
        ))
    {
        println!("Cancelled.");
        return Ok(());
    }

    let count = store.replace_all(restored.transactions)?;

    let mut settings = load_settings();
    if let Some(currency) = restored.currency {
        settings.currency = currency;
    }
    if let Some(kind) = restored.chart_type {
        settings.chart_type = kind;
    }
    save_settings(&settings)?;
    info!(count, currency = %settings.currency, "restored backup");

    TerminalNotifier.notify(Notification::success(format!(
        "Restored {count} transactions"
    )));
    Ok(())
}
