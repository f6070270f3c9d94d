//! Translator view controller: input, language pair, translation, swap,
//! copy and playback of the result

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::controller::playback::PlaybackRunner;
use crate::controller::state::{OpStatus, Sequence, SessionViewState};
use crate::controller::{
    Outcome, Services, MSG_COPIED, MSG_COPY_FAILED, MSG_EMPTY_TRANSLATION_INPUT,
    MSG_TRANSLATION_COMPLETE, MSG_TRANSLATION_FAILED,
};
use crate::core::client::Translate;
use crate::core::models::Language;
use crate::platform::{Clipboard, Notification, Notifier};

/// Drives one translator view session.
///
/// Operations take `&self`; the state lock is only held for synchronous
/// transitions, never across a network call. Overlapping submissions are
/// not queued: the presentation layer should disable a trigger while its
/// status is in flight, and a response to anything but the latest request
/// is discarded.
pub struct TranslatorController {
    translator: Arc<dyn Translate>,
    clipboard: Arc<dyn Clipboard>,
    notifier: Arc<dyn Notifier>,
    playback: PlaybackRunner,
    translation_seq: Sequence,
    state: watch::Sender<SessionViewState>,
}

impl TranslatorController {
    /// Controller starting from English to Mongolian with empty input
    pub fn new(services: Services) -> Self {
        Self::with_state(services, SessionViewState::default())
    }

    /// Controller resuming from `initial`
    pub fn with_state(services: Services, initial: SessionViewState) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            translator: services.translator,
            clipboard: services.clipboard,
            notifier: services.notifier.clone(),
            playback: PlaybackRunner::new(services.synthesizer, services.player, services.notifier),
            translation_seq: Sequence::default(),
            state,
        }
    }

    /// Current state
    pub fn snapshot(&self) -> SessionViewState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<SessionViewState> {
        self.state.subscribe()
    }

    /// Replace the text to translate
    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|s| s.input_text = text);
    }

    /// Select the input language
    pub fn set_source_lang(&self, lang: Language) {
        self.state.send_modify(|s| s.source_lang = lang);
    }

    /// Select the result language
    pub fn set_target_lang(&self, lang: Language) {
        self.state.send_modify(|s| s.target_lang = lang);
    }

    /// Translate the current input with the selected language pair
    pub async fn submit_translation(&self) -> Outcome {
        let (text, source, target) = {
            let s = self.state.borrow();
            (s.input_text.clone(), s.source_lang, s.target_lang)
        };

        if text.trim().is_empty() {
            self.notifier
                .notify(Notification::validation(MSG_EMPTY_TRANSLATION_INPUT));
            return Outcome::Rejected;
        }

        let seq = self.translation_seq.next();
        self.state
            .send_modify(|s| s.translation = OpStatus::InFlight { seq });
        debug!("Translation #{} started ({} -> {})", seq, source, target);

        match self.translator.translate(&text, source, target).await {
            Ok(translated) => {
                let applied = self.state.send_if_modified(|s| {
                    if !s.translation.is_current(seq) {
                        return false;
                    }
                    s.translated_text = translated;
                    s.translation = OpStatus::Idle;
                    true
                });

                if !applied {
                    debug!("Translation #{} superseded, discarding result", seq);
                    return Outcome::Superseded;
                }

                info!("Translation #{} complete", seq);
                self.notifier
                    .notify(Notification::success(MSG_TRANSLATION_COMPLETE));
                Outcome::Completed
            }
            Err(e) => {
                error!("Translation #{} failed: {}", seq, e);

                let applied = self.state.send_if_modified(|s| {
                    if !s.translation.is_current(seq) {
                        return false;
                    }
                    s.translation = OpStatus::Errored {
                        message: e.to_string(),
                    };
                    true
                });

                if !applied {
                    return Outcome::Superseded;
                }

                self.notifier
                    .notify(Notification::error(MSG_TRANSLATION_FAILED));
                Outcome::Failed
            }
        }
    }

    /// Speak the translated text in the target language
    pub async fn submit_playback(&self) -> Outcome {
        let (text, target) = {
            let s = self.state.borrow();
            (s.translated_text.clone(), s.target_lang)
        };

        if text.trim().is_empty() {
            return Outcome::Skipped;
        }

        self.playback
            .run(&self.state, text, target.speech_code())
            .await
    }

    /// Exchange the language pair together with input and translated text
    pub fn swap_languages(&self) {
        self.state.send_modify(|s| {
            std::mem::swap(&mut s.source_lang, &mut s.target_lang);
            std::mem::swap(&mut s.input_text, &mut s.translated_text);
        });
    }

    /// Copy the translated text to the clipboard
    pub async fn copy_result(&self) -> Outcome {
        let text = self.state.borrow().translated_text.clone();
        if text.is_empty() {
            return Outcome::Skipped;
        }

        match self.clipboard.write_text(&text).await {
            Ok(()) => {
                self.notifier.notify(Notification::success(MSG_COPIED));
                Outcome::Completed
            }
            Err(e) => {
                error!("Clipboard write failed: {}", e);
                self.notifier.notify(Notification::error(MSG_COPY_FAILED));
                Outcome::Failed
            }
        }
    }
}
