//! Text-to-speech view controller

use std::sync::Arc;
use tokio::sync::watch;

use crate::controller::playback::PlaybackRunner;
use crate::controller::state::SpeechViewState;
use crate::controller::{Outcome, Services, MSG_EMPTY_SPEECH_INPUT};
use crate::core::models::Language;
use crate::platform::{Notification, Notifier};

/// Drives one text-to-speech view session
pub struct SpeechController {
    notifier: Arc<dyn Notifier>,
    playback: PlaybackRunner,
    state: watch::Sender<SpeechViewState>,
}

impl SpeechController {
    /// Controller with empty input and Mongolian selected
    pub fn new(services: Services) -> Self {
        let (state, _) = watch::channel(SpeechViewState::default());
        Self {
            notifier: services.notifier.clone(),
            playback: PlaybackRunner::new(services.synthesizer, services.player, services.notifier),
            state,
        }
    }

    /// Current state
    pub fn snapshot(&self) -> SpeechViewState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<SpeechViewState> {
        self.state.subscribe()
    }

    /// Replace the text to speak
    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|s| s.input_text = text);
    }

    /// Select the spoken language
    pub fn set_language(&self, lang: Language) {
        self.state.send_modify(|s| s.language = lang);
    }

    /// Speak the current input in the selected language
    pub async fn submit_playback(&self) -> Outcome {
        let (text, language) = {
            let s = self.state.borrow();
            (s.input_text.clone(), s.language)
        };

        if text.trim().is_empty() {
            self.notifier
                .notify(Notification::validation(MSG_EMPTY_SPEECH_INPUT));
            return Outcome::Rejected;
        }

        self.playback
            .run(&self.state, text, language.speech_code())
            .await
    }
}
