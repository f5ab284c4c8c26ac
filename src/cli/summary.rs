use colored::{ColoredString, Colorize};
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::{compact, money};
use crate::models::{ChartKind, TransactionType};
use crate::reports::{bar_length, get_chart_series, get_totals, ChartSlice};
use crate::settings::{load_settings, save_settings, store_path};
use crate::store::TransactionStore;

const BAR_WIDTH: usize = 40;

fn paint(text: String, txn_type: TransactionType) -> ColoredString {
    match txn_type {
        TransactionType::Income => text.green(),
        TransactionType::Expense => text.red(),
        TransactionType::Recovery => text.yellow(),
    }
}

pub fn summary() -> Result<()> {
    let settings = load_settings();
    let store = TransactionStore::open(store_path())?;
    let totals = get_totals(store.transactions());
    let currency = settings.currency.as_str();

    let mut table = Table::new();
    table.set_header(vec!["", "Amount"]);
    for txn_type in TransactionType::ALL {
        table.add_row(vec![
            Cell::new(paint(
                format!("{} {}", txn_type.icon(), txn_type.label()),
                txn_type,
            )),
            Cell::new(money(totals.for_type(txn_type), currency)),
        ]);
    }
    let balance = money(totals.balance, currency);
    table.add_row(vec![
        Cell::new("Balance".bold()),
        Cell::new(if totals.balance < 0.0 {
            balance.red().bold()
        } else {
            balance.bold()
        }),
    ]);
    println!("Summary ({} transactions)\n{table}", store.len());

    if let Some(over) = totals.overspend() {
        println!();
        println!(
            "{}",
            format!("Overspending alert: expenses exceed income by {}", money(over, currency))
                .red()
                .bold()
        );
    }
    Ok(())
}

pub fn chart(kind: Option<ChartKind>, save: bool) -> Result<()> {
    let mut settings = load_settings();
    if let (true, Some(kind)) = (save, kind) {
        settings.chart_type = kind;
        save_settings(&settings)?;
        println!("Default chart set to {kind}");
    }
    let kind = kind.unwrap_or(settings.chart_type);

    let store = TransactionStore::open(store_path())?;
    let totals = get_totals(store.transactions());
    let slices = get_chart_series(&totals, kind);

    println!("{}", render_chart(&slices, kind, &settings.currency));
    Ok(())
}

/// Text rendering of a chart: one bar per slice, scaled to the largest.
/// Doughnut charts label slices with their share; bar charts with a compact
/// axis value.
pub fn render_chart(slices: &[ChartSlice], kind: ChartKind, currency: &str) -> String {
    let max = slices.iter().map(|s| s.value).fold(0.0, f64::max);
    let label_width = slices.iter().map(|s| s.label.len()).max().unwrap_or(0);

    let mut lines = vec![match kind {
        ChartKind::Doughnut => "Share of totals".to_string(),
        ChartKind::Bar => "Totals".to_string(),
    }];
    for slice in slices {
        let bar = "\u{2588}".repeat(bar_length(slice.value, max, BAR_WIDTH));
        let annotation = match kind {
            ChartKind::Doughnut => format!("{:5.1}%  {}", slice.percent, money(slice.value, currency)),
            ChartKind::Bar => compact(slice.value),
        };
        lines.push(format!(
            "{:<label_width$}  {:<BAR_WIDTH$}  {annotation}",
            slice.label,
            paint(bar, slice.txn_type),
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::Totals;

    fn totals(income: f64, expense: f64, recovery: f64) -> Totals {
        Totals {
            income,
            expense,
            recovery,
            balance: income + recovery - expense,
        }
    }

    #[test]
    fn test_doughnut_shows_percentages() {
        colored::control::set_override(false);
        let slices = get_chart_series(&totals(750.0, 250.0, 0.0), ChartKind::Doughnut);
        let out = render_chart(&slices, ChartKind::Doughnut, "USD");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("Income"));
        assert!(lines[1].contains(" 75.0%  $750"));
        assert!(lines[2].contains(" 25.0%  $250"));
        assert!(lines[3].contains("  0.0%  $0"));
    }

    #[test]
    fn test_bar_uses_compact_labels_and_scales() {
        colored::control::set_override(false);
        let slices = get_chart_series(&totals(2_000_000.0, 1_000_000.0, 0.0), ChartKind::Bar);
        let out = render_chart(&slices, ChartKind::Bar, "INR");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].ends_with("2.0M"));
        assert!(lines[2].ends_with("1.0M"));
        assert_eq!(lines[1].matches('\u{2588}').count(), BAR_WIDTH);
        assert_eq!(lines[2].matches('\u{2588}').count(), BAR_WIDTH / 2);
    }
}
