use std::time::{Duration, Instant};

use colored::Colorize;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    /// How long the message stays up; zero means until dismissed.
    pub duration: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            duration: DEFAULT_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }
}

pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// Prints to the terminal. Errors and warnings go to stderr.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl NotificationSink for TerminalNotifier {
    fn notify(&mut self, notification: Notification) {
        let Notification { message, severity, .. } = notification;
        match severity {
            Severity::Info => println!("{message}"),
            Severity::Success => println!("{}", message.green()),
            Severity::Warning => eprintln!("{}", message.yellow().bold()),
            Severity::Error => eprintln!("{}", message.red().bold()),
        }
    }
}

/// Keeps every notification in order.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    pub received: Vec<Notification>,
}

#[cfg(test)]
impl NotificationSink for MemoryNotifier {
    fn notify(&mut self, notification: Notification) {
        self.received.push(notification);
    }
}

/// Holds the latest notification until it expires. Used by the picker's
/// status line; a new message replaces the previous one.
#[derive(Debug, Default)]
pub struct StatusLine {
    current: Option<(Notification, Instant)>,
}

impl StatusLine {
    pub fn current(&self, now: Instant) -> Option<&Notification> {
        self.current.as_ref().and_then(|(n, shown_at)| {
            let live = n.duration.is_zero() || now.duration_since(*shown_at) < n.duration;
            live.then_some(n)
        })
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub fn show_at(&mut self, notification: Notification, now: Instant) {
        self.current = Some((notification, now));
    }
}

impl NotificationSink for StatusLine {
    fn notify(&mut self, notification: Notification) {
        self.show_at(notification, Instant::now());
    }
}
