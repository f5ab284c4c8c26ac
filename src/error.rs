use thiserror::Error;

#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid amount: {0} (must be a positive number)")]
    InvalidAmount(String),

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Unknown transaction type: {0} (expected income, expense, or recovery)")]
    UnknownType(String),

    #[error("Description is required")]
    EmptyDescription,

    #[error("Transaction not found: {0}")]
    TransactionNotFound(i64),

    #[error("Invalid backup file: {0}")]
    InvalidBackup(String),

    #[error("No transactions to export")]
    NothingToExport,

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, BudgetError>;
