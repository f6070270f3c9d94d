//! Custom error types for translation and speech operations

use thiserror::Error;

/// Errors raised by the clients and controllers
#[derive(Error, Debug)]
pub enum TranslatorError {
    /// Blank or otherwise unusable user input
    #[error("Validation error: {message}")]
    Validation {
        /// Message shown to the user
        message: String,
    },

    /// Speech requested for blank text
    #[error("Text is empty")]
    EmptyText,

    /// Network unreachable, connection reset or timeout
    #[error("Network error: {message}")]
    Transport {
        /// Underlying transport failure
        message: String,
    },

    /// Non-success status, either from HTTP or embedded in the payload
    #[error("Server error: {status} - {body}")]
    Server {
        /// HTTP status, or the embedded status code (0 when unparseable)
        status: u16,
        /// Response body or embedded message
        body: String,
    },

    /// Response did not have the expected shape
    #[error("Invalid response: {message}")]
    Payload {
        /// What was wrong with the response
        message: String,
    },

    /// Missing base URL, credential or malformed setting
    #[error("Configuration error: {message}")]
    Config {
        /// Which setting is missing or malformed
        message: String,
    },

    /// Unknown language or speech code
    #[error("Unsupported language: {code}")]
    UnsupportedLanguage {
        /// Code as it was given
        code: String,
    },

    /// Audio could not be played
    #[error("Playback error: {message}")]
    Playback {
        /// Decoder, device or download failure
        message: String,
    },

    /// Clipboard write failed
    #[error("Clipboard error: {message}")]
    Clipboard {
        /// Why the write failed
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for TranslatorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TranslatorError::Payload {
                message: err.to_string(),
            }
        } else {
            TranslatorError::Transport {
                message: err.to_string(),
            }
        }
    }
}

impl TranslatorError {
    /// Shorthand for a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        TranslatorError::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        TranslatorError::Config {
            message: message.into(),
        }
    }

    /// Shorthand for a payload error
    pub fn payload(message: impl Into<String>) -> Self {
        TranslatorError::Payload {
            message: message.into(),
        }
    }

    /// Whether the error was caught locally before any network call
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TranslatorError::Validation { .. } | TranslatorError::EmptyText
        )
    }
}

/// Result type for translator operations
pub type Result<T> = std::result::Result<T, TranslatorError>;
