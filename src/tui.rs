use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::Frame;

use crate::error::Result;
use crate::models::TransactionType;

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const INCOME_STYLE: Style = Style::new().fg(Color::Rgb(0, 200, 150));
pub const EXPENSE_STYLE: Style = Style::new().fg(Color::Rgb(217, 83, 111));
pub const RECOVERY_STYLE: Style = Style::new().fg(Color::Rgb(255, 174, 66));

pub const SELECTED_STYLE: Style = Style::new()
    .bg(Color::Rgb(40, 40, 60))
    .add_modifier(Modifier::BOLD);

pub fn type_style(txn_type: TransactionType) -> Style {
    match txn_type {
        TransactionType::Income => INCOME_STYLE,
        TransactionType::Expense => EXPENSE_STYLE,
        TransactionType::Recovery => RECOVERY_STYLE,
    }
}

/// Arrow icon and label for a transaction type, in the type's color.
pub fn type_span(txn_type: TransactionType) -> Span<'static> {
    Span::styled(
        format!("{} {}", txn_type.icon(), txn_type.label()),
        type_style(txn_type),
    )
}

pub enum ViewAction {
    Continue,
    Close,
}

pub trait View {
    fn draw(&mut self, frame: &mut Frame);
    fn handle_key(&mut self, code: KeyCode) -> ViewAction;
}

/// Run `view` until it closes or Ctrl-C. The terminal is restored on exit,
/// including after a panic.
pub fn run_view(view: &mut dyn View) -> Result<()> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));

    let mut terminal = ratatui::init();

    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| view.draw(frame)) {
            break Err(e.into());
        }

        // Poll so expiring status messages clear without a keypress.
        match event::poll(std::time::Duration::from_millis(250)) {
            Err(e) => break Err(e.into()),
            Ok(false) => continue,
            Ok(true) => {}
        }

        match event::read() {
            Err(e) => break Err(e.into()),
            Ok(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    break Ok(());
                }
                match view.handle_key(key.code) {
                    ViewAction::Close => break Ok(()),
                    ViewAction::Continue => {}
                }
            }
            _ => {}
        }
    };

    drop(terminal);
    ratatui::restore();
    result
}
