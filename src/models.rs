use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, Result};

/// Largest amount accepted on input (2^53 - 1); beyond it f64 loses whole units.
pub const MAX_AMOUNT: f64 = 9_007_199_254_740_991.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
    Recovery,
}

impl TransactionType {
    pub const ALL: [TransactionType; 3] = [Self::Income, Self::Expense, Self::Recovery];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Recovery => "recovery",
        }
    }

    /// Capitalized label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
            Self::Recovery => "Recovery",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Income => "\u{2191}",
            Self::Expense => "\u{2193}",
            Self::Recovery => "\u{21ba}",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "recovery" => Ok(Self::Recovery),
            other => Err(BudgetError::UnknownType(other.to_string())),
        }
    }
}

/// How the totals chart is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Doughnut,
    Bar,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doughnut => f.write_str("doughnut"),
            Self::Bar => f.write_str("bar"),
        }
    }
}

impl FromStr for ChartKind {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "doughnut" => Ok(Self::Doughnut),
            "bar" => Ok(Self::Bar),
            other => Err(BudgetError::Other(format!(
                "Unknown chart type: {other} (expected doughnut or bar)"
            ))),
        }
    }
}

/// A stored transaction. Field names on disk are `id`, `desc`, `amount`,
/// `date`, `type`, and an optional `category`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "desc")]
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub txn_type: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Transaction {
    /// Check a record read from disk. Categories are normalized so that an
    /// empty string is never stored.
    pub fn checked(mut self) -> Result<Self> {
        if self.description.trim().is_empty() {
            return Err(BudgetError::EmptyDescription);
        }
        check_amount(self.amount)?;
        self.category = normalize_category(self.category);
        Ok(self)
    }
}

/// User input for a new transaction, before an id is assigned.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub txn_type: TransactionType,
    pub category: Option<String>,
}

impl NewTransaction {
    pub fn validated(self) -> Result<Self> {
        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(BudgetError::EmptyDescription);
        }
        check_amount(self.amount)?;
        Ok(Self {
            description,
            category: normalize_category(self.category),
            ..self
        })
    }

    pub fn into_transaction(self, id: i64) -> Transaction {
        Transaction {
            id,
            description: self.description,
            amount: self.amount,
            date: self.date,
            txn_type: self.txn_type,
            category: self.category,
        }
    }
}

fn check_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(BudgetError::InvalidAmount(amount.to_string()));
    }
    if amount > MAX_AMOUNT {
        return Err(BudgetError::InvalidAmount(format!("{amount} is too large")));
    }
    Ok(())
}

/// Trim a category; blank becomes `None`.
pub fn normalize_category(category: Option<String>) -> Option<String> {
    category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

pub fn parse_amount(input: &str) -> Result<f64> {
    let amount: f64 = input
        .trim()
        .parse()
        .map_err(|_| BudgetError::InvalidAmount(input.to_string()))?;
    check_amount(amount)?;
    Ok(amount)
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| BudgetError::InvalidDate(input.to_string()))
}
