//! System clipboard access through the platform's copy utility

use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::core::errors::{Result, TranslatorError};

/// Destination for copied text
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with `text`
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// Copy utilities tried in order
const COPY_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
    ("clip", &[]),
];

/// Clipboard backed by `wl-copy`, `xclip`, `xsel`, `pbcopy` or `clip`
#[derive(Debug, Clone, Default)]
pub struct CommandClipboard;

impl CommandClipboard {
    /// Clipboard using the first copy utility found on `PATH`
    pub fn new() -> Self {
        Self
    }

    async fn pipe_to(program: &str, args: &[&str], text: &str) -> std::io::Result<bool> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
        }

        Ok(child.wait().await?.success())
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        for (program, args) in COPY_COMMANDS {
            match Self::pipe_to(program, args, text).await {
                Ok(true) => {
                    debug!("Copied {} bytes with {}", text.len(), program);
                    return Ok(());
                }
                Ok(false) => debug!("{} exited with failure", program),
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => debug!("{} failed: {}", program, e),
            }
        }

        Err(TranslatorError::Clipboard {
            message: "no working clipboard utility found".to_string(),
        })
    }
}
