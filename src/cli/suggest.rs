use chrono::Utc;
use comfy_table::{Cell, Table};

use crate::error::{BudgetError, Result};
use crate::fmt::money;
use crate::models::{parse_amount, Transaction, TransactionType};
use crate::picker::SuggestionPicker;
use crate::reports::{get_recent, get_similar_amounts};
use crate::settings::{load_settings, store_path};
use crate::store::TransactionStore;
use crate::suggest::{
    category_catalog, catalog, rank, score, usage_count, SuggestField, SuggestQuery,
};
use crate::tui::run_view;

const SIMILAR_LIMIT: usize = 10;
const RECENT_LIMIT: usize = 15;

pub fn suggest(
    term: &str,
    field: SuggestField,
    txn_type: Option<TransactionType>,
    scores: bool,
) -> Result<()> {
    let settings = load_settings();
    let store = TransactionStore::open(store_path())?;
    let query = SuggestQuery::new(term, txn_type);
    let now = Utc::now();

    if scores {
        if term.trim().is_empty() {
            return Err(BudgetError::Other("--scores needs a search term".to_string()));
        }
        let candidates = score(store.transactions(), field, &query, now, &settings.suggestions);
        if candidates.is_empty() {
            println!("No matching suggestions found");
            return Ok(());
        }
        let mut table = Table::new();
        table.set_header(vec!["Value", "Uses", "Last used", "Type", "Score"]);
        for c in &candidates {
            table.add_row(vec![
                Cell::new(&c.value),
                Cell::new(c.frequency),
                Cell::new(c.last_used.format("%Y-%m-%d")),
                Cell::new(c.dominant_type),
                Cell::new(format!("{:.2}", c.score)),
            ]);
        }
        println!("Suggestions\n{table}");
        return Ok(());
    }

    let values = rank(store.transactions(), field, &query, now, &settings.suggestions);
    if values.is_empty() {
        println!("No matching suggestions found");
    }
    for value in values {
        println!("{value}");
    }
    Ok(())
}

pub fn similar(amount: &str) -> Result<()> {
    let amount = parse_amount(amount)?;
    let settings = load_settings();
    let store = TransactionStore::open(store_path())?;
    let rows = get_similar_amounts(store.transactions(), amount, SIMILAR_LIMIT);
    if rows.is_empty() {
        println!("No transactions yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Description", "Category", "Type", "Amount", "Date"]);
    for txn in rows {
        table.add_row(vec![
            Cell::new(&txn.description),
            Cell::new(txn.category.as_deref().unwrap_or("")),
            Cell::new(txn.txn_type),
            Cell::new(money(txn.amount, &settings.currency)),
            Cell::new(txn.date.format("%Y-%m-%d")),
        ]);
    }
    println!(
        "Closest to {}\n{table}",
        money(amount, &settings.currency)
    );
    Ok(())
}

pub fn pick(field: SuggestField, txn_type: Option<TransactionType>) -> Result<()> {
    let settings = load_settings();
    let store = TransactionStore::open(store_path())?;
    let mut picker = SuggestionPicker::new(
        store.transactions().to_vec(),
        field,
        txn_type,
        settings.suggestions,
    );
    run_view(&mut picker)?;
    if let Some(value) = picker.chosen() {
        println!("{value}");
    }
    Ok(())
}

/// Own and common values per type, recent transactions, and categories.
/// `--type` narrows to one type's list; `--field category` to categories.
pub fn all(field: SuggestField, txn_type: Option<TransactionType>) -> Result<()> {
    let settings = load_settings();
    let store = TransactionStore::open(store_path())?;
    let corpus = store.transactions();

    if field == SuggestField::Category {
        println!("Categories\n{}", catalog_table(corpus, field, &category_catalog(corpus)));
        return Ok(());
    }
    if let Some(ty) = txn_type {
        println!("{}\n{}", catalog_title(ty), catalog_table(corpus, field, &catalog(corpus, ty)));
        return Ok(());
    }

    for ty in TransactionType::ALL {
        println!("{}\n{}\n", catalog_title(ty), catalog_table(corpus, field, &catalog(corpus, ty)));
    }

    let mut recent = get_recent(corpus);
    recent.truncate(RECENT_LIMIT);
    if !recent.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Description", "Type", "Amount", "Date", "Category"]);
        for txn in recent {
            table.add_row(vec![
                Cell::new(&txn.description),
                Cell::new(format!("{} {}", txn.txn_type.icon(), txn.txn_type)),
                Cell::new(money(txn.amount, &settings.currency)),
                Cell::new(txn.date.format("%Y-%m-%d")),
                Cell::new(txn.category.as_deref().unwrap_or("No category")),
            ]);
        }
        println!("Recent Transactions\n{table}\n");
    }

    println!(
        "Categories\n{}",
        catalog_table(corpus, SuggestField::Category, &category_catalog(corpus))
    );
    Ok(())
}

fn catalog_title(txn_type: TransactionType) -> &'static str {
    match txn_type {
        TransactionType::Income => "Income Sources",
        TransactionType::Expense => "Expense Categories",
        TransactionType::Recovery => "Recovery Sources",
    }
}

fn catalog_table(
    corpus: &[Transaction],
    field: SuggestField,
    values: &[String],
) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Value", "Uses"]);
    for value in values {
        let uses = match usage_count(corpus, field, value) {
            0 => "common".to_string(),
            1 => "1 time".to_string(),
            n => format!("{n} times"),
        };
        table.add_row(vec![Cell::new(value), Cell::new(uses)]);
    }
    table
}
