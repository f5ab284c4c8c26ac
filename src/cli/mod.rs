pub mod backup;
pub mod currency;
pub mod export;
pub mod init;
pub mod status;
pub mod suggest;
pub mod summary;
pub mod transactions;

use clap::{Parser, Subcommand};

use crate::models::{ChartKind, TransactionType};
use crate::suggest::SuggestField;

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Track income, expenses, and recoveries from the terminal."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up the tracker: choose a data directory and create the store.
    Init {
        /// Path for budget data (default: ~/Documents/budget-tracker)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Record a transaction.
    Add {
        /// What the money was for
        description: String,
        /// Positive amount
        amount: String,
        /// Date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// income, expense, or recovery
        #[arg(long = "type", default_value = "expense")]
        txn_type: TransactionType,
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a transaction by id.
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// List transactions, newest first.
    List {
        /// Show at most this many rows
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show income, expense, recovery, and balance totals.
    Summary,
    /// Draw the totals chart.
    Chart {
        /// doughnut or bar (default: saved preference)
        #[arg(long)]
        kind: Option<ChartKind>,
        /// Remember --kind as the default
        #[arg(long, requires = "kind")]
        save: bool,
    },
    /// Print ranked description or category suggestions.
    Suggest {
        /// Search term; blank lists recent values
        term: Option<String>,
        /// description or category
        #[arg(long, default_value = "description")]
        field: SuggestField,
        /// Only consider this transaction type
        #[arg(long = "type")]
        txn_type: Option<TransactionType>,
        /// Show frequency, last use, and score for a search term
        #[arg(long, requires = "term")]
        scores: bool,
        /// List transactions with amounts closest to this one instead
        #[arg(long, conflicts_with_all = ["term", "scores"])]
        amount: Option<String>,
        /// Browse your own and common values for every type
        #[arg(long, conflicts_with_all = ["term", "scores", "amount"])]
        all: bool,
    },
    /// Pick a suggestion interactively and print it.
    Pick {
        #[arg(long, default_value = "description")]
        field: SuggestField,
        #[arg(long = "type")]
        txn_type: Option<TransactionType>,
    },
    /// Export transactions to CSV.
    Export {
        /// Output path (default: <data_dir>/exports/budget-transactions-YYYY-MM-DD.csv)
        #[arg(long)]
        output: Option<String>,
    },
    /// Write a backup of transactions and preferences.
    Backup {
        /// Output path (default: <data_dir>/backups/budget-tracker-backup-YYYY-MM-DD.json)
        #[arg(long)]
        output: Option<String>,
    },
    /// Replace all transactions with those in a backup file.
    Restore {
        file: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Show or set the display currency.
    Currency {
        /// Three-letter code, e.g. INR or USD
        code: Option<String>,
    },
    /// Show settings and store statistics.
    Status,
}

/// Ask a yes/no question on stdin. Anything but y/yes is a no.
pub(crate) fn confirm(prompt: &str) -> bool {
    use std::io::Write;
    print!("{prompt} [y/N]: ");
    std::io::stdout().flush().ok();
    let mut input = String::new();
    if std::io::stdin().read_line(&mut input).is_err() {
        return false;
    }
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
