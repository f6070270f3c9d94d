//! Scripted fakes for the controller tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use speech_translator::controller::Services;
use speech_translator::platform::{Clipboard, Notification, Notifier, Player};
use speech_translator::{AudioHandle, Language, Result, SpeechCode, Synthesize, Translate, TranslatorError};

/// Canned reply for one call, optionally held until the gate opens
#[derive(Clone)]
pub struct Reply {
    pub gate: Option<Arc<Semaphore>>,
    pub result: std::result::Result<String, (u16, String)>,
}

impl Reply {
    pub fn ok(text: &str) -> Self {
        Self {
            gate: None,
            result: Ok(text.to_string()),
        }
    }

    pub fn server_error(status: u16, body: &str) -> Self {
        Self {
            gate: None,
            result: Err((status, body.to_string())),
        }
    }

    /// Hold the reply until a permit is added to the returned gate
    pub fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.gate = Some(gate.clone());
        (self, gate)
    }

    async fn resolve(self) -> Result<String> {
        if let Some(gate) = self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        self.result
            .map_err(|(status, body)| TranslatorError::Server { status, body })
    }
}

fn next_reply(replies: &Mutex<VecDeque<Reply>>) -> Reply {
    replies
        .lock()
        .unwrap()
        .pop_front()
        .expect("unexpected call: no reply scripted")
}

#[derive(Default)]
pub struct FakeTranslator {
    pub calls: Mutex<Vec<(String, Language, Language)>>,
    replies: Mutex<VecDeque<Reply>>,
}

impl FakeTranslator {
    pub fn with_replies(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            replies: Mutex::new(replies.into_iter().collect()),
        })
    }

    pub fn calls(&self) -> Vec<(String, Language, Language)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translate for FakeTranslator {
    async fn translate(&self, text: &str, source: Language, target: Language) -> Result<String> {
        self.calls.lock().unwrap().push((text.to_string(), source, target));
        let reply = next_reply(&self.replies);
        reply.resolve().await
    }
}

/// Replies carry the audio URL on success
#[derive(Default)]
pub struct FakeSynthesizer {
    pub calls: Mutex<Vec<(String, SpeechCode)>>,
    replies: Mutex<VecDeque<Reply>>,
}

impl FakeSynthesizer {
    pub fn with_replies(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            replies: Mutex::new(replies.into_iter().collect()),
        })
    }

    pub fn calls(&self) -> Vec<(String, SpeechCode)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Synthesize for FakeSynthesizer {
    async fn synthesize(&self, text: &str, language: SpeechCode) -> Result<AudioHandle> {
        self.calls.lock().unwrap().push((text.to_string(), language));
        let reply = next_reply(&self.replies);
        reply.resolve().await.map(AudioHandle::Remote)
    }
}

/// Records played locations; `gate` simulates audio that has not ended yet
#[derive(Default)]
pub struct FakePlayer {
    pub played: Mutex<Vec<String>>,
    pub gate: Option<Arc<Semaphore>>,
    pub fail: bool,
}

#[async_trait]
impl Player for FakePlayer {
    async fn play(&self, handle: AudioHandle) -> Result<()> {
        self.played.lock().unwrap().push(handle.location());
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        if self.fail {
            return Err(TranslatorError::Playback {
                message: "device busy".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeClipboard {
    pub writes: Mutex<Vec<String>>,
}

#[async_trait]
impl Clipboard for FakeClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notes: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn notes(&self) -> Vec<Notification> {
        self.notes.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notes.lock().unwrap().push(notification);
    }
}

/// Fakes wired into a `Services` bundle
pub struct Harness {
    pub translator: Arc<FakeTranslator>,
    pub synthesizer: Arc<FakeSynthesizer>,
    pub player: Arc<FakePlayer>,
    pub clipboard: Arc<FakeClipboard>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    pub fn new(translations: Vec<Reply>, speech: Vec<Reply>) -> Self {
        Self::with_player(translations, speech, FakePlayer::default())
    }

    pub fn with_player(translations: Vec<Reply>, speech: Vec<Reply>, player: FakePlayer) -> Self {
        Self {
            translator: FakeTranslator::with_replies(translations),
            synthesizer: FakeSynthesizer::with_replies(speech),
            player: Arc::new(player),
            clipboard: Arc::new(FakeClipboard::default()),
            notifier: Arc::new(RecordingNotifier::default()),
        }
    }

    pub fn services(&self) -> Services {
        Services {
            translator: self.translator.clone(),
            synthesizer: self.synthesizer.clone(),
            player: self.player.clone(),
            clipboard: self.clipboard.clone(),
            notifier: self.notifier.clone(),
        }
    }
}
