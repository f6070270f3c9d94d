//! View state shared between the controllers and the presentation layer

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::models::Language;

/// Status of one asynchronous operation (translation or playback)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OpStatus {
    /// Nothing outstanding
    #[default]
    Idle,
    /// Request `seq` is outstanding; only its response may update the state
    InFlight {
        /// Number of the outstanding request
        seq: u64,
    },
    /// Last request failed; the view is interactive again
    Errored {
        /// Error shown to the user
        message: String,
    },
}

impl OpStatus {
    /// Whether a request is outstanding
    pub fn is_in_flight(&self) -> bool {
        matches!(self, OpStatus::InFlight { .. })
    }

    /// Whether `seq` is the request this status is waiting on
    pub fn is_current(&self, seq: u64) -> bool {
        matches!(self, OpStatus::InFlight { seq: current } if *current == seq)
    }

    /// Message of the last failure, if any
    pub fn error_message(&self) -> Option<&str> {
        match self {
            OpStatus::Errored { message } => Some(message),
            _ => None,
        }
    }
}

/// Monotonic request numbering for one operation kind
#[derive(Debug, Default)]
pub struct Sequence(AtomicU64);

impl Sequence {
    /// Allocate the next request number, starting at 1
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// State types carrying a playback status
pub trait PlaybackSlot {
    /// Current playback status
    fn playback(&self) -> &OpStatus;
    /// Mutable playback status
    fn playback_mut(&mut self) -> &mut OpStatus;
}

/// State of the translator view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionViewState {
    /// Text to translate
    pub input_text: String,
    /// Result of the last applied translation
    pub translated_text: String,
    /// Language of the input
    pub source_lang: Language,
    /// Language of the result
    pub target_lang: Language,
    /// Translation request status
    pub translation: OpStatus,
    /// Speech playback status
    pub playback: OpStatus,
}

impl Default for SessionViewState {
    fn default() -> Self {
        Self {
            input_text: String::new(),
            translated_text: String::new(),
            source_lang: Language::English,
            target_lang: Language::Mongolian,
            translation: OpStatus::Idle,
            playback: OpStatus::Idle,
        }
    }
}

impl SessionViewState {
    /// Whether a translation is outstanding
    pub fn is_translating(&self) -> bool {
        self.translation.is_in_flight()
    }

    /// Whether speech is being synthesized or played
    pub fn is_playing(&self) -> bool {
        self.playback.is_in_flight()
    }
}

impl PlaybackSlot for SessionViewState {
    fn playback(&self) -> &OpStatus {
        &self.playback
    }

    fn playback_mut(&mut self) -> &mut OpStatus {
        &mut self.playback
    }
}

/// State of the text-to-speech view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeechViewState {
    /// Text to speak
    pub input_text: String,
    /// Language the text is spoken in
    pub language: Language,
    /// Speech playback status
    pub playback: OpStatus,
}

impl Default for SpeechViewState {
    fn default() -> Self {
        Self {
            input_text: String::new(),
            language: Language::Mongolian,
            playback: OpStatus::Idle,
        }
    }
}

impl SpeechViewState {
    /// Whether speech is being synthesized or played
    pub fn is_playing(&self) -> bool {
        self.playback.is_in_flight()
    }
}

impl PlaybackSlot for SpeechViewState {
    fn playback(&self) -> &OpStatus {
        &self.playback
    }

    fn playback_mut(&mut self) -> &mut OpStatus {
        &mut self.playback
    }
}
