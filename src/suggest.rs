//! Description and category suggestions ranked from transaction history.
//!
//! Two modes, picked by the search term:
//!
//! - **Recency** (blank term): distinct values, most recently used first.
//!   With a type filter, values matching a curated list for that type are
//!   pulled to the front.
//! - **Relevance** (non-blank term): values containing the term, scored by
//!   `frequency × max(1, 30 / (days_since_last_use + 1)) × boost`, where the
//!   boost applies when the value's dominant type equals the type filter.
//!
//! Ranking is a pure function of its arguments. The caller passes `now`.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BudgetError, Result};
use crate::models::{Transaction, TransactionType};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Which value of a transaction is suggested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuggestField {
    #[default]
    Description,
    Category,
}

impl SuggestField {
    /// The field's value, or `None` when absent or empty.
    pub fn value_of(self, txn: &Transaction) -> Option<&str> {
        let value = match self {
            Self::Description => Some(txn.description.as_str()),
            Self::Category => txn.category.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }
}

impl fmt::Display for SuggestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Description => f.write_str("description"),
            Self::Category => f.write_str("category"),
        }
    }
}

impl FromStr for SuggestField {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "description" | "desc" => Ok(Self::Description),
            "category" => Ok(Self::Category),
            other => Err(BudgetError::Other(format!(
                "Unknown field: {other} (expected description or category)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestQuery {
    pub term: String,
    pub type_filter: Option<TransactionType>,
}

impl SuggestQuery {
    pub fn new(term: impl Into<String>, type_filter: Option<TransactionType>) -> Self {
        Self {
            term: term.into(),
            type_filter,
        }
    }
}

/// Tunable ranking constants. Defaults reproduce the stock behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Cap on results in recency mode.
    pub recency_limit: usize,
    /// Cap on results in relevance mode.
    pub relevance_limit: usize,
    /// How many curated matches lead the recency list when a type is selected.
    pub keyword_limit: usize,
    /// Score multiplier for values whose dominant type equals the filter.
    pub type_boost: f64,
    /// Recency weight for same-day use; decays as `scale / (days + 1)`.
    pub recency_scale: f64,
    /// When false, the type filter only boosts and no longer narrows the corpus.
    pub restrict_to_type: bool,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            recency_limit: 10,
            relevance_limit: 15,
            keyword_limit: 5,
            type_boost: 1.5,
            recency_scale: 30.0,
            restrict_to_type: true,
        }
    }
}

/// A distinct value with the statistics it was ranked by.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub value: String,
    pub frequency: usize,
    pub last_used: NaiveDate,
    pub dominant_type: TransactionType,
    pub score: f64,
}

// ---------------------------------------------------------------------------
// Curated values per type
// ---------------------------------------------------------------------------

const INCOME_KEYWORDS: &[&str] = &[
    "salary", "wage", "payment", "income", "earnings", "revenue", "bonus", "commission",
];
const EXPENSE_KEYWORDS: &[&str] = &[
    "grocery", "rent", "utility", "transport", "food", "dining", "shopping", "health",
];
const RECOVERY_KEYWORDS: &[&str] = &["refund", "recovery", "return", "claim", "reimbursement"];

const INCOME_CATEGORIES: &[&str] = &[
    "Salary", "Freelance", "Business", "Investment", "Bonus", "Commission", "Gift", "Other Income",
];
const EXPENSE_CATEGORIES: &[&str] = &[
    "Groceries", "Rent", "Utilities", "Transportation", "Dining Out", "Entertainment", "Shopping",
    "Healthcare",
];
const RECOVERY_CATEGORIES: &[&str] = &["Refund", "Reimbursement", "Claim", "Return", "Recovery"];

/// Descriptions match a keyword anywhere in the text; categories must equal
/// a curated name (ignoring case).
fn is_curated(field: SuggestField, txn_type: TransactionType, value: &str) -> bool {
    let lower = value.to_lowercase();
    match field {
        SuggestField::Description => {
            let keywords = match txn_type {
                TransactionType::Income => INCOME_KEYWORDS,
                TransactionType::Expense => EXPENSE_KEYWORDS,
                TransactionType::Recovery => RECOVERY_KEYWORDS,
            };
            keywords.iter().any(|k| lower.contains(k))
        }
        SuggestField::Category => {
            let names = match txn_type {
                TransactionType::Income => INCOME_CATEGORIES,
                TransactionType::Expense => EXPENSE_CATEGORIES,
                TransactionType::Recovery => RECOVERY_CATEGORIES,
            };
            names.iter().any(|n| n.to_lowercase() == lower)
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Entries per catalog list.
pub const CATALOG_LIMIT: usize = 16;

const COMMON_INCOME_SOURCES: &[&str] = &[
    "Salary", "Freelance Work", "Consulting Fee", "Business Revenue", "Investment Income",
    "Dividends", "Rental Income", "Bonus", "Commission", "Gift Money", "Tax Refund",
    "Insurance Payout", "Loan Repayment", "Grant", "Scholarship", "Pension", "Royalties",
    "Online Sales", "Service Payment", "Project Payment",
];
const COMMON_EXPENSE_CATEGORIES: &[&str] = &[
    "Groceries", "Rent", "Utilities", "Transportation", "Dining Out", "Entertainment",
    "Shopping", "Healthcare", "Insurance", "Education", "Travel", "Subscriptions",
    "Loan Payment", "Credit Card", "Taxes", "Home Maintenance", "Personal Care", "Gifts",
    "Donations", "Investments", "Fuel", "Parking", "Public Transport", "Internet", "Phone Bill",
    "Streaming Services", "Gym Membership", "Clothing", "Electronics", "Home Decor",
    "Pet Expenses", "Childcare",
];
const COMMON_RECOVERY_SOURCES: &[&str] = &[
    "Debt Recovery", "Loan Return", "Deposit Refund", "Security Deposit", "Insurance Claim",
    "Warranty Claim", "Tax Refund", "Reimbursement", "Returned Purchase",
    "Cancelled Service Refund", "Overpayment Refund",
];

/// Everything worth offering for one type: the user's own descriptions of
/// that type in first-use order, then the common ones, without repeats.
pub fn catalog(corpus: &[Transaction], txn_type: TransactionType) -> Vec<String> {
    let common = match txn_type {
        TransactionType::Income => COMMON_INCOME_SOURCES,
        TransactionType::Expense => COMMON_EXPENSE_CATEGORIES,
        TransactionType::Recovery => COMMON_RECOVERY_SOURCES,
    };
    let own = corpus
        .iter()
        .filter(|t| t.txn_type == txn_type)
        .filter_map(|t| SuggestField::Description.value_of(t));
    merge_catalog(own, common)
}

/// The user's categories in first-use order, then the common expense
/// categories, without repeats.
pub fn category_catalog(corpus: &[Transaction]) -> Vec<String> {
    let own = corpus
        .iter()
        .filter_map(|t| SuggestField::Category.value_of(t));
    merge_catalog(own, COMMON_EXPENSE_CATEGORIES)
}

/// How many transactions carry `value` in `field`. Zero marks a common entry.
pub fn usage_count(corpus: &[Transaction], field: SuggestField, value: &str) -> usize {
    corpus
        .iter()
        .filter(|t| field.value_of(t) == Some(value))
        .count()
}

fn merge_catalog<'a>(own: impl Iterator<Item = &'a str>, common: &[&'a str]) -> Vec<String> {
    let mut seen = HashSet::new();
    own.chain(common.iter().copied())
        .filter(|v| seen.insert(*v))
        .take(CATALOG_LIMIT)
        .map(String::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Rank suggestion values for `query` over `corpus`.
pub fn rank(
    corpus: &[Transaction],
    field: SuggestField,
    query: &SuggestQuery,
    now: DateTime<Utc>,
    config: &RankConfig,
) -> Vec<String> {
    let ranked: Vec<String> = if query.term.trim().is_empty() {
        recent_values(corpus, field, query.type_filter, config)
    } else {
        score(corpus, field, query, now, config)
            .into_iter()
            .map(|c| c.value)
            .collect()
    };
    debug!(
        field = %field,
        term = %query.term,
        type_filter = ?query.type_filter,
        corpus = corpus.len(),
        results = ranked.len(),
        "ranked suggestions"
    );
    ranked
}

/// Relevance-mode candidates with their scores, best first. A blank term
/// matches every value.
pub fn score(
    corpus: &[Transaction],
    field: SuggestField,
    query: &SuggestQuery,
    now: DateTime<Utc>,
    config: &RankConfig,
) -> Vec<ScoredCandidate> {
    let needle = query.term.trim().to_lowercase();

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut candidates: Vec<ScoredCandidate> = Vec::new();

    for txn in corpus
        .iter()
        .filter(|t| in_scope(t, query.type_filter, config))
    {
        let Some(value) = field.value_of(txn) else {
            continue;
        };
        if !value.to_lowercase().contains(&needle) {
            continue;
        }
        match index.get(value) {
            Some(&i) => {
                let c = &mut candidates[i];
                c.frequency += 1;
                c.dominant_type = txn.txn_type;
                if txn.date > c.last_used {
                    c.last_used = txn.date;
                }
            }
            None => {
                index.insert(value, candidates.len());
                candidates.push(ScoredCandidate {
                    value: value.to_string(),
                    frequency: 1,
                    last_used: txn.date,
                    dominant_type: txn.txn_type,
                    score: 0.0,
                });
            }
        }
    }

    for c in &mut candidates {
        c.score = relevance(c.frequency, c.last_used, c.dominant_type, query.type_filter, now, config);
    }

    // Stable: equal scores keep the order values were first seen in.
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(config.relevance_limit);
    candidates
}

/// `frequency × recency weight × boost` for one value.
pub fn relevance(
    frequency: usize,
    last_used: NaiveDate,
    dominant_type: TransactionType,
    type_filter: Option<TransactionType>,
    now: DateTime<Utc>,
    config: &RankConfig,
) -> f64 {
    let weight = recency_weight(days_since(last_used, now), config);
    let boost = if type_filter == Some(dominant_type) {
        config.type_boost
    } else {
        1.0
    };
    frequency as f64 * weight * boost
}

/// Saturates at `recency_scale` for same-day use and never drops below 1.
pub fn recency_weight(days: f64, config: &RankConfig) -> f64 {
    (config.recency_scale / (days + 1.0)).max(1.0)
}

/// Fractional days from midnight UTC of `date` to `now`. Future dates count
/// as zero days.
pub fn days_since(date: NaiveDate, now: DateTime<Utc>) -> f64 {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let millis = (now - start).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).max(0.0)
}

fn in_scope(txn: &Transaction, type_filter: Option<TransactionType>, config: &RankConfig) -> bool {
    match type_filter {
        Some(ty) if config.restrict_to_type => txn.txn_type == ty,
        _ => true,
    }
}

fn recent_values(
    corpus: &[Transaction],
    field: SuggestField,
    type_filter: Option<TransactionType>,
    config: &RankConfig,
) -> Vec<String> {
    let scoped: Vec<&Transaction> = corpus
        .iter()
        .filter(|t| in_scope(t, type_filter, config))
        .collect();

    let mut by_date = scoped.clone();
    by_date.sort_by(|a, b| b.date.cmp(&a.date));

    let mut seen = HashSet::new();
    let recent: Vec<&str> = by_date
        .iter()
        .filter_map(|t| field.value_of(t))
        .filter(|v| seen.insert(*v))
        .collect();

    let mut out: Vec<String> = Vec::new();
    let mut emitted: HashSet<&str> = HashSet::new();

    if let Some(ty) = type_filter {
        let curated = scoped
            .iter()
            .filter_map(|t| field.value_of(t))
            .filter(|v| is_curated(field, ty, v))
            .take(config.keyword_limit);
        for value in curated {
            if emitted.insert(value) {
                out.push(value.to_string());
            }
        }
    }

    for value in recent.into_iter().take(config.recency_limit) {
        if emitted.insert(value) {
            out.push(value.to_string());
        }
    }

    out.truncate(config.recency_limit);
    out
}
