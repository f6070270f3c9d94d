//! Translation clients for the custom backend and the MyMemory public API

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::config::{TranslationMode, TranslatorConfig};
use crate::core::errors::{Result, TranslatorError};
use crate::core::models::{Language, TranslationRequest, TranslationResult};

/// Contract shared by every translation backend
#[async_trait]
pub trait Translate: Send + Sync {
    /// Translate `text` from `source` to `target`.
    ///
    /// Blank text yields an empty string without touching the network.
    async fn translate(&self, text: &str, source: Language, target: Language) -> Result<String>;
}

/// Build the HTTP client shared by the translation and speech backends
pub(crate) fn http_client(config: &TranslatorConfig) -> Result<reqwest::Client> {
    if config.timeout_ms == 0 {
        return Err(TranslatorError::config("timeout_ms must be greater than 0"));
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .pool_idle_timeout(Some(Duration::from_secs(30)))
        .build()
        .map_err(|e| TranslatorError::config(format!("failed to build HTTP client: {}", e)))?;
    Ok(client)
}

/// Read the body of a non-success response into a `Server` error
pub(crate) async fn server_error(response: reqwest::Response) -> TranslatorError {
    let status = response.status().as_u16();
    let body = error_body(response.text().await);
    TranslatorError::Server { status, body }
}

/// An unreadable error body is logged and reported as empty
fn error_body(text: reqwest::Result<String>) -> String {
    text.unwrap_or_else(|e| {
        warn!("Failed to read error response body: {}", e);
        String::new()
    })
}

/// Select the translation backend named by the configuration
pub fn build_translator(config: &TranslatorConfig) -> Result<Arc<dyn Translate>> {
    config.validate_translation()?;

    let translator: Arc<dyn Translate> = match config.translation_mode {
        TranslationMode::Backend => Arc::new(BackendTranslator::new(config)?),
        TranslationMode::MyMemory => Arc::new(MyMemoryTranslator::new(config)?),
    };
    info!("Using {} translation backend", config.translation_mode);
    Ok(translator)
}

/// Body of `POST {base}/translate`
#[derive(Debug, Serialize)]
struct BackendTranslateBody<'a> {
    text: &'a str,
    source_lang: Language,
    target_lang: Language,
}

#[derive(Debug, Deserialize)]
struct BackendTranslateResponse {
    translated: String,
}

/// Client for the custom translation backend
#[derive(Debug, Clone)]
pub struct BackendTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl BackendTranslator {
    /// Create a backend translator; fails if no base URL is configured
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        let base = config.require_backend_url()?;
        Ok(Self {
            client: http_client(config)?,
            endpoint: format!("{}/translate", base),
        })
    }

    /// Translate a validated request
    pub async fn translate_request(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        let body = BackendTranslateBody {
            text: &request.text,
            source_lang: request.source_lang,
            target_lang: request.target_lang,
        };

        debug!("POST {} ({} -> {})", self.endpoint, request.source_lang, request.target_lang);

        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        let text = response.text().await?;
        let parsed: BackendTranslateResponse = serde_json::from_str(&text).map_err(|e| {
            TranslatorError::payload(format!("no translated text in response: {}", e))
        })?;

        Ok(TranslationResult {
            translated_text: parsed.translated,
        })
    }
}

#[async_trait]
impl Translate for BackendTranslator {
    async fn translate(&self, text: &str, source: Language, target: Language) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let request = TranslationRequest::new(text, source, target)?;
        Ok(self.translate_request(&request).await?.translated_text)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    response_data: MyMemoryData,
    /// Number on success, sometimes a string on failure
    response_status: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryData {
    #[serde(default)]
    translated_text: Option<String>,
}

impl MyMemoryResponse {
    fn status(&self) -> Option<u16> {
        match &self.response_status {
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Client for the MyMemory public translation API
#[derive(Debug, Clone)]
pub struct MyMemoryTranslator {
    client: reqwest::Client,
    endpoint: String,
    site_key: Option<String>,
}

impl MyMemoryTranslator {
    /// Client for the configured MyMemory endpoint and optional site key
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        if config.mymemory_endpoint.trim().is_empty() {
            return Err(TranslatorError::config("MyMemory endpoint is required"));
        }

        Ok(Self {
            client: http_client(config)?,
            endpoint: config.mymemory_endpoint.clone(),
            site_key: config.mymemory_key.clone(),
        })
    }

    /// Translate a validated request
    pub async fn translate_request(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        let langpair = format!("{}|{}", request.source_lang, request.target_lang);
        let mut query = vec![("q", request.text.as_str()), ("langpair", langpair.as_str())];
        if let Some(key) = &self.site_key {
            query.push(("de", key.as_str()));
        }

        debug!("GET {} langpair={}", self.endpoint, langpair);

        let response = self.client.get(&self.endpoint).query(&query).send().await?;

        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        let text = response.text().await?;
        let parsed: MyMemoryResponse = serde_json::from_str(&text)
            .map_err(|e| TranslatorError::payload(format!("unexpected MyMemory response: {}", e)))?;

        let status = parsed.status();
        let translated = parsed.response_data.translated_text.unwrap_or_default();

        // HTTP 200 can still carry a failure in responseStatus
        if status != Some(200) {
            let body = if translated.trim().is_empty() {
                "Translation error".to_string()
            } else {
                translated
            };
            return Err(TranslatorError::Server {
                status: status.unwrap_or(0),
                body,
            });
        }

        Ok(TranslationResult {
            translated_text: translated,
        })
    }
}

#[async_trait]
impl Translate for MyMemoryTranslator {
    async fn translate(&self, text: &str, source: Language, target: Language) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let request = TranslationRequest::new(text, source, target)?;
        Ok(self.translate_request(&request).await?.translated_text)
    }
}
