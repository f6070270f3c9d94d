//! User-facing notifications

use std::fmt;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Operation completed
    Success,
    /// Request failed
    Error,
    /// Input was rejected before any request
    Validation,
}

/// A toast-style message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity
    pub level: Level,
    /// Text shown to the user
    pub message: String,
}

impl Notification {
    /// Success notification
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    /// Error notification
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }

    /// Validation warning
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            level: Level::Validation,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.level {
            Level::Success => "✅",
            Level::Error => "❌",
            Level::Validation => "⚠️ ",
        };
        write!(f, "{} {}", icon, self.message)
    }
}

/// Receives notifications raised by the controllers
pub trait Notifier: Send + Sync {
    /// Show `notification` to the user
    fn notify(&self, notification: Notification);
}

/// Prints notifications to the terminal
#[derive(Debug, Clone, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Success => println!("{}", notification),
            Level::Error | Level::Validation => eprintln!("{}", notification),
        }
    }
}
