use crate::models::{ChartKind, Transaction, TransactionType};

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub recovery: f64,
    pub balance: f64,
}

impl Totals {
    /// How far expenses exceed income plus recoveries, if they do.
    pub fn overspend(&self) -> Option<f64> {
        (self.balance < 0.0).then(|| self.balance.abs())
    }

    pub fn for_type(&self, txn_type: TransactionType) -> f64 {
        match txn_type {
            TransactionType::Income => self.income,
            TransactionType::Expense => self.expense,
            TransactionType::Recovery => self.recovery,
        }
    }
}

pub fn get_totals(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals::default();
    for txn in transactions {
        match txn.txn_type {
            TransactionType::Income => totals.income += txn.amount,
            TransactionType::Expense => totals.expense += txn.amount,
            TransactionType::Recovery => totals.recovery += txn.amount,
        }
    }
    totals.balance = totals.income + totals.recovery - totals.expense;
    totals
}

// ---------------------------------------------------------------------------
// Transaction list
// ---------------------------------------------------------------------------

/// Most recent first; equal dates keep insertion order.
pub fn get_recent(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut rows: Vec<&Transaction> = transactions.iter().collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

/// Transactions whose amount is closest to `amount`.
pub fn get_similar_amounts(transactions: &[Transaction], amount: f64, limit: usize) -> Vec<&Transaction> {
    let mut rows: Vec<&Transaction> = transactions.iter().collect();
    rows.sort_by(|a, b| (a.amount - amount).abs().total_cmp(&(b.amount - amount).abs()));
    rows.truncate(limit);
    rows
}

// ---------------------------------------------------------------------------
// Chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub label: &'static str,
    pub txn_type: TransactionType,
    pub value: f64,
    /// Share of the chart total, 0.0..=100.0 (0 when the total is 0).
    pub percent: f64,
}

fn series_label(txn_type: TransactionType) -> &'static str {
    match txn_type {
        TransactionType::Income => "Income",
        TransactionType::Expense => "Expenses",
        TransactionType::Recovery => "Recovery",
    }
}

/// Doughnut charts always carry all three slices. Bar charts drop empty
/// series unless every series is empty.
pub fn get_chart_series(totals: &Totals, kind: ChartKind) -> Vec<ChartSlice> {
    let all: Vec<(TransactionType, f64)> = TransactionType::ALL
        .iter()
        .map(|&t| (t, totals.for_type(t)))
        .collect();
    let picked: Vec<(TransactionType, f64)> = match kind {
        ChartKind::Doughnut => all,
        ChartKind::Bar => {
            let non_zero: Vec<_> = all.iter().copied().filter(|(_, v)| *v > 0.0).collect();
            if non_zero.is_empty() {
                all
            } else {
                non_zero
            }
        }
    };
    let sum: f64 = picked.iter().map(|(_, v)| v).sum();
    picked
        .into_iter()
        .map(|(txn_type, value)| ChartSlice {
            label: series_label(txn_type),
            txn_type,
            value,
            percent: if sum > 0.0 { value / sum * 100.0 } else { 0.0 },
        })
        .collect()
}

/// Length of a bar scaled so the largest value spans `width` cells.
pub fn bar_length(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    let len = (value / max * width as f64).round() as usize;
    len.clamp(1, width)
}
