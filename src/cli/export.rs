use std::path::PathBuf;

use chrono::Local;

use crate::error::Result;
use crate::export::{default_file_name, write_csv};
use crate::settings::{get_data_dir, store_path};
use crate::store::TransactionStore;

pub fn run(output: Option<String>) -> Result<()> {
    let store = TransactionStore::open(store_path())?;
    let dest = match output {
        Some(p) => PathBuf::from(p),
        None => get_data_dir()
            .join("exports")
            .join(default_file_name(Local::now().date_naive())),
    };
    let path = write_csv(store.transactions(), &dest)?;
    println!("Exported {} transactions to {}", store.len(), path.display());
    Ok(())
}
