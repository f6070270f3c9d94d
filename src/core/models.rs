//! Core data models for translation and speech

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::core::errors::{Result, TranslatorError};

/// Languages understood by the translation backends (two-letter codes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// `en`
    #[serde(rename = "en")]
    English,
    /// `mn`
    #[serde(rename = "mn")]
    Mongolian,
    /// `th`
    #[serde(rename = "th")]
    Thai,
    /// `bn`
    #[serde(rename = "bn")]
    Bengali,
    /// `hi`
    #[serde(rename = "hi")]
    Hindi,
}

impl Language {
    /// Every supported language, in display order
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Mongolian,
        Language::Thai,
        Language::Bengali,
        Language::Hindi,
    ];

    /// Two-letter code sent to the translation backend
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Mongolian => "mn",
            Language::Thai => "th",
            Language::Bengali => "bn",
            Language::Hindi => "hi",
        }
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Mongolian => "Mongolian",
            Language::Thai => "Thai",
            Language::Bengali => "Bengali",
            Language::Hindi => "Hindi",
        }
    }

    /// Speech-service code for this language
    pub fn speech_code(&self) -> SpeechCode {
        match self {
            Language::English => SpeechCode::Eng,
            Language::Mongolian => SpeechCode::Mon,
            Language::Thai => SpeechCode::Tha,
            Language::Bengali => SpeechCode::Ben,
            Language::Hindi => SpeechCode::Hin,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = TranslatorError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == code)
            .ok_or(TranslatorError::UnsupportedLanguage { code })
    }
}

/// Languages understood by the speech backends (three-letter codes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechCode {
    /// English
    Eng,
    /// Mongolian
    Mon,
    /// Thai
    Tha,
    /// Bengali
    Ben,
    /// Hindi
    Hin,
}

impl SpeechCode {
    /// Three-letter code sent to the speech backend
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeechCode::Eng => "eng",
            SpeechCode::Mon => "mon",
            SpeechCode::Tha => "tha",
            SpeechCode::Ben => "ben",
            SpeechCode::Hin => "hin",
        }
    }

    /// Translation language this speech code maps back to
    pub fn language(&self) -> Language {
        match self {
            SpeechCode::Eng => Language::English,
            SpeechCode::Mon => Language::Mongolian,
            SpeechCode::Tha => Language::Thai,
            SpeechCode::Ben => Language::Bengali,
            SpeechCode::Hin => Language::Hindi,
        }
    }
}

impl fmt::Display for SpeechCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SpeechCode {
    type Err = TranslatorError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .map(|lang| lang.speech_code())
            .find(|speech| speech.as_str() == code)
            .ok_or(TranslatorError::UnsupportedLanguage { code })
    }
}

/// Translation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Non-blank text to translate
    pub text: String,
    /// Language of `text`
    pub source_lang: Language,
    /// Language to translate into
    pub target_lang: Language,
}

impl TranslationRequest {
    /// Build a request, rejecting blank text
    pub fn new(text: impl Into<String>, source_lang: Language, target_lang: Language) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(TranslatorError::validation("Please enter some text to translate."));
        }

        Ok(Self {
            text,
            source_lang,
            target_lang,
        })
    }
}

/// Translation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    /// Text in the target language
    pub translated_text: String,
}

/// Speech synthesis request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechRequest {
    /// Text to speak
    pub text: String,
    /// Speech code of the voice language
    pub language: SpeechCode,
}

impl SpeechRequest {
    /// Request without validation; the synthesizers reject blank text
    pub fn new(text: impl Into<String>, language: SpeechCode) -> Self {
        Self {
            text: text.into(),
            language,
        }
    }
}

/// Playable audio resource produced by a speech backend.
///
/// Local handles own a temporary file that is removed when the handle is
/// dropped, so a handle lives exactly as long as the playback using it.
#[derive(Debug)]
pub enum AudioHandle {
    /// Audio hosted by the speech vendor
    Remote(String),
    /// Audio bytes written to a temporary file
    Local(tempfile::TempPath),
}

impl AudioHandle {
    /// URL or filesystem path handed to the player
    pub fn location(&self) -> String {
        match self {
            AudioHandle::Remote(url) => url.clone(),
            AudioHandle::Local(path) => path.display().to_string(),
        }
    }

    /// Path of the local file, if any
    pub fn local_path(&self) -> Option<&Path> {
        match self {
            AudioHandle::Remote(_) => None,
            AudioHandle::Local(path) => Some(&**path),
        }
    }
}
