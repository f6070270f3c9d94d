//! In-process audio playback through rodio

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};

use async_trait::async_trait;
use rodio::{Decoder, OutputStreamBuilder, Sink};
use tracing::{debug, info};

use crate::core::client::http_client;
use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslatorError};
use crate::core::models::AudioHandle;

/// Plays one audio handle to completion
#[async_trait]
pub trait Player: Send + Sync {
    /// Resolves when the audio has finished playing.
    ///
    /// The handle is consumed; local audio files are removed afterwards.
    async fn play(&self, handle: AudioHandle) -> Result<()>;
}

fn playback_error(message: impl Into<String>) -> TranslatorError {
    TranslatorError::Playback {
        message: message.into(),
    }
}

/// Decode an audio stream, before any output device is opened
pub(crate) fn decode<R>(reader: R) -> Result<Decoder<R>>
where
    R: Read + Seek + Send + Sync + 'static,
{
    Decoder::new(reader).map_err(|e| playback_error(format!("failed to decode audio: {}", e)))
}

/// Play a decoded source on the default output device, blocking until it ends
fn play_blocking<R>(source: Decoder<R>) -> Result<()>
where
    R: Read + Seek + Send + Sync + 'static,
{
    let mut stream = OutputStreamBuilder::open_default_stream()
        .map_err(|e| playback_error(format!("audio output unavailable: {}", e)))?;
    stream.log_on_drop(false);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.sleep_until_end();
    Ok(())
}

/// Player that decodes audio in-process and plays it on the default device.
///
/// Remote handles are downloaded first; local handles are read from disk.
#[derive(Debug, Clone)]
pub struct RodioPlayer {
    client: reqwest::Client,
}

impl RodioPlayer {
    /// Player sharing the request timeout of the other clients
    pub fn from_config(config: &TranslatorConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(config)?,
        })
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| playback_error(format!("failed to fetch audio: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(playback_error(format!(
                "failed to fetch audio: {}",
                status.as_u16()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| playback_error(format!("failed to fetch audio: {}", e)))?;
        debug!("Fetched {} bytes of audio from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Player for RodioPlayer {
    async fn play(&self, handle: AudioHandle) -> Result<()> {
        debug!("Playing {}", handle.location());

        let task = match handle {
            AudioHandle::Remote(url) => {
                let source = decode(Cursor::new(self.fetch(&url).await?))?;
                tokio::task::spawn_blocking(move || play_blocking(source))
            }
            AudioHandle::Local(path) => {
                let source = decode(BufReader::new(File::open(&path)?))?;
                // The temporary file lives until the sink has drained
                tokio::task::spawn_blocking(move || {
                    let result = play_blocking(source);
                    drop(path);
                    result
                })
            }
        };

        task.await
            .map_err(|e| playback_error(format!("playback task failed: {}", e)))??;

        info!("Playback finished");
        Ok(())
    }
}
