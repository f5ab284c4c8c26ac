use chrono::Local;
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::{BudgetError, Result};
use crate::fmt::money;
use crate::models::{parse_amount, parse_date, NewTransaction, Transaction, TransactionType};
use crate::notify::{Notification, NotificationSink, TerminalNotifier};
use crate::reports::{get_recent, get_totals};
use crate::settings::{load_settings, store_path};
use crate::store::TransactionStore;

pub fn add(
    description: &str,
    amount: &str,
    date: Option<&str>,
    txn_type: TransactionType,
    category: Option<String>,
) -> Result<()> {
    let new = NewTransaction {
        description: description.to_string(),
        amount: parse_amount(amount)?,
        date: match date {
            Some(d) => parse_date(d)?,
            None => Local::now().date_naive(),
        },
        txn_type,
        category,
    };
    let settings = load_settings();
    let mut store = TransactionStore::open(store_path())?;
    add_to(&mut store, new, &settings.currency, &mut TerminalNotifier)?;
    Ok(())
}

/// Append to `store` and report through `sink`, including an overspend
/// warning when expenses now exceed income plus recoveries.
pub fn add_to(
    store: &mut TransactionStore,
    new: NewTransaction,
    currency: &str,
    sink: &mut dyn NotificationSink,
) -> Result<i64> {
    let txn = store.add(new)?;
    let id = txn.id;
    sink.notify(Notification::success(format!(
        "Added {}: {} ({}) [id {id}]",
        txn.txn_type,
        txn.description,
        money(txn.amount, currency)
    )));

    if let Some(over) = get_totals(store.transactions()).overspend() {
        sink.notify(Notification::warning(format!(
            "Warning: you have overspent by {}",
            money(over, currency)
        )));
    }
    Ok(id)
}

pub fn delete(id: i64, yes: bool) -> Result<()> {
    let settings = load_settings();
    let mut store = TransactionStore::open(store_path())?;
    let Some(txn) = store.get(id) else {
        return Err(BudgetError::TransactionNotFound(id));
    };

    println!("{}", transaction_table(&[txn], &settings.currency));
    if !yes && !super::confirm("Delete this transaction?") {
        println!("Cancelled.");
        return Ok(());
    }

    let removed = store.remove(id)?;
    TerminalNotifier.notify(Notification::success(format!(
        "Deleted: {}",
        removed.description
    )));
    Ok(())
}

pub fn list(limit: Option<usize>) -> Result<()> {
    let settings = load_settings();
    let store = TransactionStore::open(store_path())?;
    if store.is_empty() {
        println!("No transactions yet. Add one with `budget add`.");
        return Ok(());
    }

    let mut rows = get_recent(store.transactions());
    let total = rows.len();
    if let Some(n) = limit {
        rows.truncate(n);
    }

    println!("Transactions\n{}", transaction_table(&rows, &settings.currency));
    if rows.len() < total {
        println!("Showing {} of {total}", rows.len());
    }
    Ok(())
}

fn transaction_table(rows: &[&Transaction], currency: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Description", "Category", "Type", "Amount"]);
    for txn in rows {
        let kind = format!("{} {}", txn.txn_type.icon(), txn.txn_type.label());
        let kind = match txn.txn_type {
            TransactionType::Income => kind.green(),
            TransactionType::Expense => kind.red(),
            TransactionType::Recovery => kind.yellow(),
        };
        table.add_row(vec![
            Cell::new(txn.id),
            Cell::new(txn.date.format("%Y-%m-%d")),
            Cell::new(&txn.description),
            Cell::new(txn.category.as_deref().unwrap_or("")),
            Cell::new(kind),
            Cell::new(money(txn.amount, currency)),
        ]);
    }
    table
}
