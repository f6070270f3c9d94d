//! Collaborators the controllers hand results to: audio player, clipboard
//! and notification sink

pub mod clipboard;
pub mod notify;
pub mod player;

pub use clipboard::{Clipboard, CommandClipboard};
pub use notify::{Level, Notification, Notifier, TerminalNotifier};
pub use player::{Player, RodioPlayer};
