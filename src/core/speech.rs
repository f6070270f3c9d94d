//! Speech synthesis clients for the custom backend and the Voiser API

use async_trait::async_trait;
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::core::client::{http_client, server_error};
use crate::core::config::{SpeechMode, TranslatorConfig, VoiceSettings};
use crate::core::errors::{Result, TranslatorError};
use crate::core::models::{AudioHandle, SpeechCode, SpeechRequest};

/// Contract shared by every speech backend
#[async_trait]
pub trait Synthesize: Send + Sync {
    /// Synthesize `text` and return a playable handle.
    ///
    /// Blank text fails with [`TranslatorError::EmptyText`] before any request.
    async fn synthesize(&self, text: &str, language: SpeechCode) -> Result<AudioHandle>;
}

/// Select the speech backend named by the configuration
pub fn build_synthesizer(config: &TranslatorConfig) -> Result<Arc<dyn Synthesize>> {
    config.validate_speech()?;

    let synthesizer: Arc<dyn Synthesize> = match config.speech_mode {
        SpeechMode::Backend => Arc::new(BackendSynthesizer::new(config)?),
        SpeechMode::Voiser => Arc::new(VoiserSynthesizer::new(config)?),
    };
    info!("Using {} speech backend", config.speech_mode);
    Ok(synthesizer)
}

/// File suffix for a response content type
fn audio_suffix(content_type: &str) -> &'static str {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match mime.as_str() {
        "audio/wav" | "audio/x-wav" | "audio/wave" => ".wav",
        "audio/mpeg" | "audio/mp3" => ".mp3",
        "audio/ogg" => ".ogg",
        _ => ".bin",
    }
}

/// Write raw audio bytes to a temporary file owned by the returned handle
fn store_audio(bytes: &[u8], content_type: &str) -> Result<AudioHandle> {
    let mut file = tempfile::Builder::new()
        .prefix("tts-")
        .suffix(audio_suffix(content_type))
        .tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;

    let path = file.into_temp_path();
    debug!("Stored {} bytes of audio at {}", bytes.len(), path.display());
    Ok(AudioHandle::Local(path))
}

#[derive(Debug, Serialize)]
struct BackendTtsBody<'a> {
    text: &'a str,
    language_id: SpeechCode,
}

/// Client for the custom speech backend returning raw audio
#[derive(Debug, Clone)]
pub struct BackendSynthesizer {
    client: reqwest::Client,
    endpoint: String,
}

impl BackendSynthesizer {
    /// Create a backend synthesizer; fails if no base URL is configured
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        let base = config.require_backend_url()?;
        Ok(Self {
            client: http_client(config)?,
            endpoint: format!("{}/tts", base),
        })
    }

    /// Synthesize a request into a local audio file
    pub async fn synthesize_request(&self, request: &SpeechRequest) -> Result<AudioHandle> {
        let body = BackendTtsBody {
            text: &request.text,
            language_id: request.language,
        };

        debug!("POST {} (language_id={})", self.endpoint, request.language);

        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let bytes = response.bytes().await?;

        // The backend answers blank text with a JSON error and status 200
        if content_type.starts_with("application/json") {
            let payload: serde_json::Value = serde_json::from_slice(&bytes)?;
            let message = payload["error"]
                .as_str()
                .unwrap_or("expected audio, got JSON")
                .to_string();
            return Err(TranslatorError::payload(message));
        }

        if bytes.is_empty() {
            return Err(TranslatorError::payload("empty audio response"));
        }

        store_audio(&bytes, &content_type)
    }
}

#[async_trait]
impl Synthesize for BackendSynthesizer {
    async fn synthesize(&self, text: &str, language: SpeechCode) -> Result<AudioHandle> {
        if text.trim().is_empty() {
            return Err(TranslatorError::EmptyText);
        }

        self.synthesize_request(&SpeechRequest::new(text, language)).await
    }
}

/// Named location of an audio URL in a Voiser payload
#[derive(Debug, Clone, Copy)]
pub struct AudioUrlRule {
    /// Field name reported in logs
    pub name: &'static str,
    /// JSON pointer into the payload
    pub pointer: &'static str,
}

/// Known audio URL locations, in priority order
pub const AUDIO_URL_RULES: &[AudioUrlRule] = &[
    AudioUrlRule {
        name: "AudioUrl",
        pointer: "/AudioUrl",
    },
    AudioUrlRule {
        name: "url",
        pointer: "/url",
    },
    AudioUrlRule {
        name: "Data.AudioUrl",
        pointer: "/Data/AudioUrl",
    },
];

/// Return the first non-empty audio URL matched by [`AUDIO_URL_RULES`]
pub fn extract_audio_url(payload: &serde_json::Value) -> Result<String> {
    AUDIO_URL_RULES
        .iter()
        .find_map(|rule| {
            payload
                .pointer(rule.pointer)
                .and_then(|v| v.as_str())
                .filter(|url| !url.trim().is_empty())
                .map(|url| {
                    debug!("Audio URL found under {}", rule.name);
                    url.to_string()
                })
        })
        .ok_or_else(|| TranslatorError::payload("no audio location found"))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiserBody<'a> {
    auth_code: &'a str,
    article_text: &'a str,
    config_lang: &'a str,
    config_voice: &'a str,
    config_pitch: &'a str,
    config_speed: &'a str,
}

/// Client for the Voiser vendor API returning a hosted audio URL
#[derive(Debug, Clone)]
pub struct VoiserSynthesizer {
    client: reqwest::Client,
    endpoint: String,
    auth_code: String,
    voice: VoiceSettings,
}

impl VoiserSynthesizer {
    /// Create a Voiser synthesizer; fails if no auth code is configured
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        let auth_code = config.require_voiser_auth_code()?;
        if config.voiser_endpoint.trim().is_empty() {
            return Err(TranslatorError::config("Voiser endpoint is required"));
        }

        Ok(Self {
            client: http_client(config)?,
            endpoint: config.voiser_endpoint.clone(),
            auth_code,
            voice: config.voice.clone(),
        })
    }

    /// Voiser selects its voice from the configured settings, not from the
    /// request language, which is only logged here.
    pub async fn synthesize_request(&self, request: &SpeechRequest) -> Result<AudioHandle> {
        let body = VoiserBody {
            auth_code: &self.auth_code,
            article_text: &request.text,
            config_lang: &self.voice.lang,
            config_voice: &self.voice.voice,
            config_pitch: &self.voice.pitch,
            config_speed: &self.voice.speed,
        };

        debug!(
            "POST {} (requested={}, configLang={})",
            self.endpoint, request.language, self.voice.lang
        );

        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        let text = response.text().await?;
        let payload: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| TranslatorError::payload(format!("unexpected Voiser response: {}", e)))?;

        extract_audio_url(&payload)
            .map(AudioHandle::Remote)
            .map_err(|e| {
                error!("Unexpected Voiser response: {}", payload);
                e
            })
    }
}

#[async_trait]
impl Synthesize for VoiserSynthesizer {
    async fn synthesize(&self, text: &str, language: SpeechCode) -> Result<AudioHandle> {
        if text.trim().is_empty() {
            return Err(TranslatorError::EmptyText);
        }

        self.synthesize_request(&SpeechRequest::new(text, language)).await
    }
}
