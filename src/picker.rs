use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::models::{Transaction, TransactionType};
use crate::notify::{Notification, NotificationSink, Severity, StatusLine};
use crate::selection::{self, NavKey, Step};
use crate::suggest::{rank, RankConfig, SuggestField, SuggestQuery};
use crate::tui::{
    self, type_span, View, ViewAction, EXPENSE_STYLE, FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE,
};

/// Interactive input with live suggestions. Type to filter, arrows to move,
/// Enter to take a suggestion (or accept the typed text once the list is
/// closed), Tab to cycle the type filter, Esc to close the list or quit.
pub struct SuggestionPicker {
    corpus: Vec<Transaction>,
    field: SuggestField,
    type_filter: Option<TransactionType>,
    config: RankConfig,
    input: String,
    suggestions: Vec<String>,
    selection: Option<usize>,
    list_open: bool,
    chosen: Option<String>,
    status: StatusLine,
    table_state: TableState,
}

impl SuggestionPicker {
    pub fn new(
        corpus: Vec<Transaction>,
        field: SuggestField,
        type_filter: Option<TransactionType>,
        config: RankConfig,
    ) -> Self {
        let mut picker = Self {
            corpus,
            field,
            type_filter,
            config,
            input: String::new(),
            suggestions: Vec::new(),
            selection: None,
            list_open: true,
            chosen: None,
            status: StatusLine::default(),
            table_state: TableState::default(),
        };
        picker.refresh(Utc::now());
        picker
    }

    /// The accepted value, once the picker has closed with one.
    pub fn chosen(&self) -> Option<&str> {
        self.chosen.as_deref()
    }

    /// Re-rank for the current input. Highlight resets like a fresh list.
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        let query = SuggestQuery::new(self.input.clone(), self.type_filter);
        self.suggestions = rank(&self.corpus, self.field, &query, now, &self.config);
        self.selection = None;
        self.list_open = true;
    }

    fn navigate(&mut self, key: NavKey) -> ViewAction {
        let len = if self.list_open { self.suggestions.len() } else { 0 };
        let step = selection::step(self.selection, len, key);
        self.selection = selection::next_selection(self.selection, step);
        match step {
            Step::Accept(i) => {
                if let Some(value) = self.suggestions.get(i).cloned() {
                    self.status.notify(Notification::success(format!("Selected: {value}")));
                    self.input = value;
                }
                self.list_open = false;
                ViewAction::Continue
            }
            Step::Dismiss => {
                self.list_open = false;
                ViewAction::Continue
            }
            Step::Move(_) => ViewAction::Continue,
            Step::Ignored => match key {
                NavKey::Confirm => self.finish(),
                NavKey::Cancel => ViewAction::Close,
                NavKey::Up | NavKey::Down => ViewAction::Continue,
            },
        }
    }

    fn finish(&mut self) -> ViewAction {
        let value = self.input.trim();
        if value.is_empty() {
            // Stays up until the next keystroke.
            self.status.notify(
                Notification::warning(format!("Enter a {}", self.field))
                    .with_duration(Duration::ZERO),
            );
            return ViewAction::Continue;
        }
        self.chosen = Some(value.to_string());
        ViewAction::Close
    }

    fn cycle_type(&mut self) {
        self.type_filter = match self.type_filter {
            None => Some(TransactionType::Income),
            Some(TransactionType::Income) => Some(TransactionType::Expense),
            Some(TransactionType::Expense) => Some(TransactionType::Recovery),
            Some(TransactionType::Recovery) => None,
        };
        let label = self.type_filter.map_or("any", |t| t.as_str());
        self.status.notify(Notification::info(format!("Type filter: {label}")));
    }

    /// Type annotation shown next to each suggestion.
    fn meta(&self, value: &str) -> Option<(TransactionType, usize)> {
        let uses: Vec<TransactionType> = self
            .corpus
            .iter()
            .filter(|t| self.field.value_of(t) == Some(value))
            .map(|t| t.txn_type)
            .collect();
        let first = *uses.first()?;
        let dominant = match self.field {
            SuggestField::Description => first,
            SuggestField::Category => TransactionType::ALL
                .iter()
                .copied()
                .max_by_key(|ty| (uses.iter().filter(|u| *u == ty).count(), *ty == first))
                .unwrap_or(first),
        };
        Some((dominant, uses.len()))
    }
}

impl View for SuggestionPicker {
    fn draw(&mut self, frame: &mut Frame) {
        let areas = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Length(3), // input
            Constraint::Fill(1),   // suggestions
            Constraint::Length(1), // status
            Constraint::Length(1), // keys
        ])
        .split(frame.area());

        let filter = self.type_filter.map_or("any type", |t| t.label());
        frame.render_widget(
            Paragraph::new(format!("Pick a {} ({filter})", self.field)).style(HEADER_STYLE),
            areas[0],
        );

        frame.render_widget(
            Paragraph::new(format!("{}\u{2588}", self.input))
                .block(Block::default().borders(Borders::ALL)),
            areas[1],
        );

        if self.list_open {
            if self.suggestions.is_empty() {
                let msg = if self.input.trim().is_empty() {
                    "No suggestions yet"
                } else {
                    "No matching suggestions found"
                };
                frame.render_widget(Paragraph::new(msg).style(FOOTER_STYLE), areas[2]);
            } else {
                let rows: Vec<Row> = self
                    .suggestions
                    .iter()
                    .map(|value| {
                        let meta = match self.meta(value) {
                            Some((ty, count)) if self.field == SuggestField::Category => {
                                let noun = if count == 1 { "transaction" } else { "transactions" };
                                Line::from(Span::styled(
                                    format!("{count} {noun} {}", ty.icon()),
                                    tui::type_style(ty),
                                ))
                            }
                            Some((ty, _)) => Line::from(type_span(ty)),
                            None => Line::default(),
                        };
                        Row::new(vec![Cell::from(value.clone()), Cell::from(meta)])
                    })
                    .collect();
                self.table_state.select(self.selection);
                let table = Table::new(rows, [Constraint::Fill(1), Constraint::Length(20)])
                    .column_spacing(1)
                    .row_highlight_style(SELECTED_STYLE);
                frame.render_stateful_widget(table, areas[2], &mut self.table_state);
            }
        }

        if let Some(n) = self.status.current(Instant::now()) {
            let style = match n.severity {
                Severity::Error | Severity::Warning => EXPENSE_STYLE,
                Severity::Info | Severity::Success => FOOTER_STYLE,
            };
            frame.render_widget(Paragraph::new(n.message.clone()).style(style), areas[3]);
        }

        frame.render_widget(
            Paragraph::new(" \u{2191}\u{2193}=move  Enter=select  Tab=type  Esc=close")
                .style(FOOTER_STYLE),
            areas[4],
        );
    }

    fn handle_key(&mut self, code: KeyCode) -> ViewAction {
        match code {
            KeyCode::Down => self.navigate(NavKey::Down),
            KeyCode::Up => self.navigate(NavKey::Up),
            KeyCode::Enter => self.navigate(NavKey::Confirm),
            KeyCode::Esc => self.navigate(NavKey::Cancel),
            KeyCode::Tab => {
                self.cycle_type();
                self.refresh(Utc::now());
                ViewAction::Continue
            }
            KeyCode::Backspace => {
                self.status.dismiss();
                self.input.pop();
                self.refresh(Utc::now());
                ViewAction::Continue
            }
            KeyCode::Char(c) => {
                self.status.dismiss();
                self.input.push(c);
                self.refresh(Utc::now());
                ViewAction::Continue
            }
            _ => ViewAction::Continue,
        }
    }
}

#[cfg(test)]
impl SuggestionPicker {
    fn input(&self) -> &str {
        &self.input
    }

    fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    fn selection(&self) -> Option<usize> {
        self.selection
    }

    fn is_list_open(&self) -> bool {
        self.list_open
    }

    fn type_filter(&self) -> Option<TransactionType> {
        self.type_filter
    }

    fn status_message(&self) -> Option<&str> {
        self.status.current(Instant::now()).map(|n| n.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(id: i64, desc: &str, ty: TransactionType, date: &str, category: Option<&str>) -> Transaction {
        Transaction {
            id,
            description: desc.to_string(),
            amount: 100.0,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            txn_type: ty,
            category: category.map(String::from),
        }
    }

    fn corpus() -> Vec<Transaction> {
        vec![
            txn(1, "Salary", TransactionType::Income, "2024-01-01", Some("Job")),
            txn(2, "Salary", TransactionType::Income, "2024-06-01", Some("Job")),
            txn(3, "Rent", TransactionType::Expense, "2024-06-02", Some("Housing")),
            txn(4, "Deposit refund", TransactionType::Recovery, "2024-03-01", Some("Housing")),
        ]
    }

    fn picker(field: SuggestField) -> SuggestionPicker {
        SuggestionPicker::new(corpus(), field, None, RankConfig::default())
    }

    fn type_text(p: &mut SuggestionPicker, text: &str) {
        for c in text.chars() {
            p.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn test_opens_with_recent_values() {
        let p = picker(SuggestField::Description);
        assert_eq!(p.suggestions(), ["Rent", "Salary", "Deposit refund"]);
        assert!(p.is_list_open());
        assert_eq!(p.selection(), None);
    }

    #[test]
    fn test_typing_filters() {
        let mut p = picker(SuggestField::Description);
        type_text(&mut p, "sal");
        assert_eq!(p.input(), "sal");
        assert_eq!(p.suggestions(), ["Salary"]);
        p.handle_key(KeyCode::Backspace);
        p.handle_key(KeyCode::Backspace);
        assert_eq!(p.input(), "s");
    }

    #[test]
    fn test_arrow_then_enter_fills_input_and_closes_list() {
        let mut p = picker(SuggestField::Description);
        p.handle_key(KeyCode::Down);
        p.handle_key(KeyCode::Down);
        assert_eq!(p.selection(), Some(1));
        assert!(matches!(p.handle_key(KeyCode::Enter), ViewAction::Continue));
        assert_eq!(p.input(), "Salary");
        assert!(!p.is_list_open());
        assert_eq!(p.chosen(), None);

        // With the list closed, Enter accepts the input.
        assert!(matches!(p.handle_key(KeyCode::Enter), ViewAction::Close));
        assert_eq!(p.chosen(), Some("Salary"));
    }

    #[test]
    fn test_enter_without_highlight_takes_first() {
        let mut p = picker(SuggestField::Description);
        p.handle_key(KeyCode::Enter);
        assert_eq!(p.input(), "Rent");
    }

    #[test]
    fn test_escape_closes_list_then_quits() {
        let mut p = picker(SuggestField::Description);
        assert!(matches!(p.handle_key(KeyCode::Esc), ViewAction::Continue));
        assert!(!p.is_list_open());
        assert!(matches!(p.handle_key(KeyCode::Esc), ViewAction::Close));
        assert_eq!(p.chosen(), None);
    }

    #[test]
    fn test_unmatched_text_can_be_accepted() {
        let mut p = picker(SuggestField::Description);
        type_text(&mut p, "Bonus");
        assert!(p.suggestions().is_empty());
        assert!(matches!(p.handle_key(KeyCode::Enter), ViewAction::Close));
        assert_eq!(p.chosen(), Some("Bonus"));
    }

    #[test]
    fn test_blank_input_is_not_accepted() {
        let mut p = SuggestionPicker::new(Vec::new(), SuggestField::Description, None, RankConfig::default());
        assert!(matches!(p.handle_key(KeyCode::Enter), ViewAction::Continue));
        assert_eq!(p.chosen(), None);
        assert_eq!(p.status_message(), Some("Enter a description"));

        p.handle_key(KeyCode::Char('x'));
        assert_eq!(p.status_message(), None);
    }

    #[test]
    fn test_tab_cycles_type_filter() {
        let mut p = picker(SuggestField::Description);
        p.handle_key(KeyCode::Tab);
        assert_eq!(p.type_filter(), Some(TransactionType::Income));
        assert_eq!(p.suggestions(), ["Salary"]);
        p.handle_key(KeyCode::Tab);
        p.handle_key(KeyCode::Tab);
        assert_eq!(p.type_filter(), Some(TransactionType::Recovery));
        assert_eq!(p.suggestions(), ["Deposit refund"]);
        p.handle_key(KeyCode::Tab);
        assert_eq!(p.type_filter(), None);
    }

    #[test]
    fn test_category_meta_uses_most_common_type() {
        let mut data = corpus();
        data.push(txn(5, "Repairs", TransactionType::Expense, "2024-04-01", Some("Housing")));
        let p = SuggestionPicker::new(data, SuggestField::Category, None, RankConfig::default());
        assert_eq!(p.meta("Housing"), Some((TransactionType::Expense, 3)));
        assert_eq!(p.meta("Job"), Some((TransactionType::Income, 2)));
        assert_eq!(p.meta("Nope"), None);
    }
}
