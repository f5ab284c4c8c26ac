use std::path::PathBuf;

use crate::error::Result;
use crate::fmt::{format_bytes, money};
use crate::models::TransactionType;
use crate::reports::get_totals;
use crate::settings::{load_settings, settings_file_exists, STORE_FILE};
use crate::store::TransactionStore;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = PathBuf::from(&settings.data_dir);
    let store_path = data_dir.join(STORE_FILE);

    println!("Data dir:   {}", data_dir.display());
    println!("Store:      {}", store_path.display());
    println!("Currency:   {}", settings.currency);
    println!("Chart:      {}", settings.chart_type);

    if !settings_file_exists() || !store_path.exists() {
        println!();
        println!("Store not found. Run `budget init` to set up.");
        return Ok(());
    }

    let size = std::fs::metadata(&store_path)?.len();
    println!("Store size: {}", format_bytes(size));

    let store = TransactionStore::open(&store_path)?;
    let totals = get_totals(store.transactions());
    let count = |ty: TransactionType| store.transactions().iter().filter(|t| t.txn_type == ty).count();

    println!();
    println!("Transactions:  {}", store.len());
    println!("  Income:      {}", count(TransactionType::Income));
    println!("  Expense:     {}", count(TransactionType::Expense));
    println!("  Recovery:    {}", count(TransactionType::Recovery));
    println!("Balance:       {}", money(totals.balance, &settings.currency));
    Ok(())
}
