//! View-state controllers driving the translation and speech clients

pub mod playback;
pub mod speech;
pub mod state;
pub mod translator;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::core::client::{build_translator, Translate};
use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslatorError};
use crate::core::models::{AudioHandle, Language, SpeechCode};
use crate::core::speech::{build_synthesizer, Synthesize};
use crate::platform::{Clipboard, CommandClipboard, Notifier, Player, RodioPlayer, TerminalNotifier};

pub use speech::SpeechController;
pub use state::{OpStatus, SessionViewState, SpeechViewState};
pub use translator::TranslatorController;

/// Shown when translation is submitted with blank input
pub const MSG_EMPTY_TRANSLATION_INPUT: &str = "Please enter some text to translate.";
/// Shown when speech playback is submitted with blank input
pub const MSG_EMPTY_SPEECH_INPUT: &str = "Please enter some text to speak.";
/// Shown after a translation result is applied
pub const MSG_TRANSLATION_COMPLETE: &str = "Translation complete!";
/// Shown when the translation request fails
pub const MSG_TRANSLATION_FAILED: &str = "Translation failed. Please try again.";
/// Shown when synthesis or playback fails
pub const MSG_SPEECH_FAILED: &str = "Failed to generate speech. Check your token or try again.";
/// Shown after the translated text is copied
pub const MSG_COPIED: &str = "Text copied to clipboard!";
/// Shown when the clipboard write fails
pub const MSG_COPY_FAILED: &str = "Failed to copy text to clipboard.";

/// How a controller operation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation ran and its result was applied
    Completed,
    /// Nothing to do (e.g. no translated text yet)
    Skipped,
    /// Input failed validation; no request was made
    Rejected,
    /// The request failed and the user was notified
    Failed,
    /// A newer request was issued meanwhile; this response was discarded
    Superseded,
}

/// Clients and collaborators shared by the controllers
#[derive(Clone)]
pub struct Services {
    /// Translation client
    pub translator: Arc<dyn Translate>,
    /// Speech client
    pub synthesizer: Arc<dyn Synthesize>,
    /// Audio output
    pub player: Arc<dyn Player>,
    /// Clipboard for copied results
    pub clipboard: Arc<dyn Clipboard>,
    /// Sink for user-facing notifications
    pub notifier: Arc<dyn Notifier>,
}

impl Services {
    /// Build the configured backends with terminal collaborators.
    ///
    /// A backend whose configuration is incomplete is replaced by one that
    /// reports the configuration error when it is first used, so a missing
    /// speech credential does not prevent translating.
    pub fn from_config(config: &TranslatorConfig) -> Result<Self> {
        let translator = build_translator(config).unwrap_or_else(|e| {
            warn!("Translation backend unavailable: {}", e);
            Arc::new(Unavailable::new(e)) as Arc<dyn Translate>
        });

        let synthesizer = build_synthesizer(config).unwrap_or_else(|e| {
            warn!("Speech backend unavailable: {}", e);
            Arc::new(Unavailable::new(e)) as Arc<dyn Synthesize>
        });

        Ok(Self {
            translator,
            synthesizer,
            player: Arc::new(RodioPlayer::from_config(config)?),
            clipboard: Arc::new(CommandClipboard::new()),
            notifier: Arc::new(TerminalNotifier),
        })
    }
}

/// Stand-in for a backend that could not be configured
#[derive(Debug, Clone)]
struct Unavailable {
    message: String,
}

impl Unavailable {
    fn new(err: TranslatorError) -> Self {
        let message = match err {
            TranslatorError::Config { message } => message,
            other => other.to_string(),
        };
        Self { message }
    }
}

#[async_trait]
impl Translate for Unavailable {
    async fn translate(&self, text: &str, _source: Language, _target: Language) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }
        Err(TranslatorError::config(self.message.clone()))
    }
}

#[async_trait]
impl Synthesize for Unavailable {
    async fn synthesize(&self, text: &str, _language: SpeechCode) -> Result<AudioHandle> {
        if text.trim().is_empty() {
            return Err(TranslatorError::EmptyText);
        }
        Err(TranslatorError::config(self.message.clone()))
    }
}
