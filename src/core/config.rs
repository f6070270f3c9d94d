//! Configuration management

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

use crate::core::errors::{Result, TranslatorError};

/// Public MyMemory translation endpoint
pub const DEFAULT_MYMEMORY_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

/// Voiser speech synthesis endpoint
pub const DEFAULT_VOISER_ENDPOINT: &str = "https://api.voiser.net/v2/limitless/";

/// Which translation backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationMode {
    /// Custom backend exposing `POST /translate`
    Backend,
    /// Public MyMemory API
    MyMemory,
}

/// Which speech backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechMode {
    /// Custom backend exposing `POST /tts`
    Backend,
    /// Voiser vendor API
    Voiser,
}

impl fmt::Display for TranslationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationMode::Backend => write!(f, "backend"),
            TranslationMode::MyMemory => write!(f, "mymemory"),
        }
    }
}

impl fmt::Display for SpeechMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeechMode::Backend => write!(f, "backend"),
            SpeechMode::Voiser => write!(f, "voiser"),
        }
    }
}

impl FromStr for TranslationMode {
    type Err = TranslatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "backend" => Ok(TranslationMode::Backend),
            "mymemory" => Ok(TranslationMode::MyMemory),
            other => Err(TranslatorError::config(format!(
                "unknown TRANSLATION_MODE '{}', expected backend or mymemory",
                other
            ))),
        }
    }
}

impl FromStr for SpeechMode {
    type Err = TranslatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "backend" => Ok(SpeechMode::Backend),
            "voiser" => Ok(SpeechMode::Voiser),
            other => Err(TranslatorError::config(format!(
                "unknown SPEECH_MODE '{}', expected backend or voiser",
                other
            ))),
        }
    }
}

/// Voice settings sent with every Voiser request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// Locale such as `mn-MN`
    pub lang: String,
    /// Vendor voice name
    pub voice: String,
    /// Pitch offset, sent as text
    pub pitch: String,
    /// Speaking rate, sent as text
    pub speed: String,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            lang: "mn-MN".to_string(),
            voice: "Mongolian Female".to_string(),
            pitch: "0".to_string(),
            speed: "1".to_string(),
        }
    }
}

/// Configuration for the translation and speech clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Selected translation backend
    pub translation_mode: TranslationMode,
    /// Selected speech backend
    pub speech_mode: SpeechMode,
    /// Base URL of the custom backend serving `/translate` and `/tts`
    pub backend_url: Option<String>,
    /// MyMemory `get` endpoint
    pub mymemory_endpoint: String,
    /// Site key (`de` parameter) for MyMemory
    pub mymemory_key: Option<String>,
    /// Voiser synthesis endpoint
    pub voiser_endpoint: String,
    /// Voiser API key
    pub voiser_auth_code: Option<String>,
    /// Voice sent with every Voiser request
    pub voice: VoiceSettings,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            translation_mode: TranslationMode::MyMemory,
            speech_mode: SpeechMode::Backend,
            backend_url: None,
            mymemory_endpoint: DEFAULT_MYMEMORY_ENDPOINT.to_string(),
            mymemory_key: None,
            voiser_endpoint: DEFAULT_VOISER_ENDPOINT.to_string(),
            voiser_auth_code: None,
            voice: VoiceSettings::default(),
            timeout_ms: 30000,
        }
    }
}

impl TranslatorConfig {
    /// Load configuration from environment variables.
    ///
    /// Only malformed values fail here; missing URLs or credentials are
    /// reported when the client that needs them is built.
    pub fn from_env() -> Result<Self> {
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;

        info!(
            "Loaded configuration: translation={}, speech={}",
            config.translation_mode, config.speech_mode
        );

        Ok(config)
    }

    /// Build configuration from a variable lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let translation_mode = match var("TRANSLATION_MODE") {
            Some(v) => v.parse()?,
            None => defaults.translation_mode,
        };

        let speech_mode = match var("SPEECH_MODE") {
            Some(v) => v.parse()?,
            None => defaults.speech_mode,
        };

        let timeout_ms = match var("REQUEST_TIMEOUT_MS") {
            Some(v) => v.parse::<u64>().map_err(|e| {
                TranslatorError::config(format!("REQUEST_TIMEOUT_MS '{}': {}", v, e))
            })?,
            None => defaults.timeout_ms,
        };

        let voice = VoiceSettings {
            lang: var("VOISER_LANG").unwrap_or(defaults.voice.lang),
            voice: var("VOISER_VOICE").unwrap_or(defaults.voice.voice),
            pitch: var("VOISER_PITCH").unwrap_or(defaults.voice.pitch),
            speed: var("VOISER_SPEED").unwrap_or(defaults.voice.speed),
        };

        Ok(Self {
            translation_mode,
            speech_mode,
            backend_url: var("BACKEND_URL"),
            mymemory_endpoint: var("MYMEMORY_ENDPOINT").unwrap_or(defaults.mymemory_endpoint),
            mymemory_key: var("MYMEMORY_DE"),
            voiser_endpoint: var("VOISER_ENDPOINT").unwrap_or(defaults.voiser_endpoint),
            voiser_auth_code: var("VOISER_AUTH_CODE"),
            voice,
            timeout_ms,
        })
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Base URL of the custom backend without a trailing slash
    pub fn require_backend_url(&self) -> Result<String> {
        self.backend_url
            .as_deref()
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| TranslatorError::config("BACKEND_URL is required for backend mode"))
    }

    /// Voiser auth code, rejecting a blank one
    pub fn require_voiser_auth_code(&self) -> Result<String> {
        self.voiser_auth_code
            .clone()
            .filter(|code| !code.trim().is_empty())
            .ok_or_else(|| {
                TranslatorError::config("Voiser API key (VOISER_AUTH_CODE) is required")
            })
    }

    /// Validate the settings needed by the selected translation backend
    pub fn validate_translation(&self) -> Result<()> {
        match self.translation_mode {
            TranslationMode::Backend => {
                self.require_backend_url()?;
            }
            TranslationMode::MyMemory => {
                if self.mymemory_endpoint.trim().is_empty() {
                    return Err(TranslatorError::config("MyMemory endpoint is required"));
                }
                if self.mymemory_key.is_none() {
                    warn!("MYMEMORY_DE is not set, anonymous MyMemory quota applies");
                }
            }
        }
        Ok(())
    }

    /// Validate the settings needed by the selected speech backend
    pub fn validate_speech(&self) -> Result<()> {
        match self.speech_mode {
            SpeechMode::Backend => {
                self.require_backend_url()?;
            }
            SpeechMode::Voiser => {
                self.require_voiser_auth_code()?;
                if self.voiser_endpoint.trim().is_empty() {
                    return Err(TranslatorError::config("Voiser endpoint is required"));
                }
            }
        }
        Ok(())
    }

    /// Backend-mode configuration pointing both clients at `base_url`
    pub fn for_backend(base_url: impl Into<String>) -> Self {
        Self {
            translation_mode: TranslationMode::Backend,
            speech_mode: SpeechMode::Backend,
            backend_url: Some(base_url.into()),
            ..Default::default()
        }
    }
}
