//! Speech Translator - translate text between languages and listen to the result
//!
//! This library wraps a translation API and a text-to-speech API behind
//! interchangeable clients, and provides the view-state controllers that
//! orchestrate them for an interactive front end.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod controller;
pub mod core;
pub mod platform;

// Re-export key types for convenience
pub use crate::core::{
    client::{build_translator, BackendTranslator, MyMemoryTranslator, Translate},
    config::{SpeechMode, TranslationMode, TranslatorConfig},
    errors::{Result, TranslatorError},
    models::{AudioHandle, Language, SpeechCode, SpeechRequest, TranslationRequest, TranslationResult},
    speech::{build_synthesizer, BackendSynthesizer, Synthesize, VoiserSynthesizer},
};

pub use controller::{
    OpStatus, Outcome, Services, SessionViewState, SpeechController, SpeechViewState,
    TranslatorController,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
