use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{BudgetError, Result};
use crate::models::{NewTransaction, Transaction};

/// All transactions, persisted as one JSON array.
#[derive(Debug)]
pub struct TransactionStore {
    path: PathBuf,
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    /// Load the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let transactions = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                let values: Vec<Value> = serde_json::from_str(&content)?;
                parse_records(values)
            }
        } else {
            Vec::new()
        };
        debug!(path = %path.display(), count = transactions.len(), "opened transaction store");
        Ok(Self { path, transactions })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of every transaction in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Validate, assign an id, append, and save.
    pub fn add(&mut self, new: NewTransaction) -> Result<&Transaction> {
        let new = new.validated()?;
        let id = self.next_id(Utc::now().timestamp_millis());
        self.transactions.push(new.into_transaction(id));
        if let Err(e) = self.save() {
            self.transactions.pop();
            return Err(e);
        }
        let idx = self.transactions.len() - 1;
        Ok(&self.transactions[idx])
    }

    pub fn remove(&mut self, id: i64) -> Result<Transaction> {
        let idx = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or(BudgetError::TransactionNotFound(id))?;
        let removed = self.transactions.remove(idx);
        if let Err(e) = self.save() {
            self.transactions.insert(idx, removed);
            return Err(e);
        }
        Ok(removed)
    }

    /// Swap in a whole new corpus (restore). Returns how many were kept.
    pub fn replace_all(&mut self, transactions: Vec<Transaction>) -> Result<usize> {
        let previous = std::mem::replace(&mut self.transactions, dedupe_ids(transactions));
        if let Err(e) = self.save() {
            self.transactions = previous;
            return Err(e);
        }
        Ok(self.transactions.len())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.transactions)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, format!("{json}\n"))?;
        std::fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), count = self.transactions.len(), "saved transaction store");
        Ok(())
    }

    /// Millisecond timestamps make ids; bump on collision.
    fn next_id(&self, candidate: i64) -> i64 {
        let mut id = candidate;
        while self.transactions.iter().any(|t| t.id == id) {
            id += 1;
        }
        id
    }
}

/// Decode raw JSON records, skipping (and logging) any that are malformed.
pub fn parse_records(values: Vec<Value>) -> Vec<Transaction> {
    let total = values.len();
    let parsed: Vec<Transaction> = values
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| {
            match serde_json::from_value::<Transaction>(value)
                .map_err(BudgetError::from)
                .and_then(Transaction::checked)
            {
                Ok(txn) => Some(txn),
                Err(e) => {
                    warn!(record = idx, error = %e, "skipping malformed transaction");
                    None
                }
            }
        })
        .collect();
    let parsed = dedupe_ids(parsed);
    if parsed.len() < total {
        warn!(skipped = total - parsed.len(), "some stored transactions were skipped");
    }
    parsed
}

fn dedupe_ids(transactions: Vec<Transaction>) -> Vec<Transaction> {
    let mut seen = HashSet::new();
    transactions
        .into_iter()
        .filter(|t| {
            let fresh = seen.insert(t.id);
            if !fresh {
                warn!(id = t.id, "dropping transaction with duplicate id");
            }
            fresh
        })
        .collect()
}
