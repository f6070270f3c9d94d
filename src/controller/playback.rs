//! Synthesize-then-play flow shared by both controllers

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error};

use crate::controller::state::{OpStatus, PlaybackSlot, Sequence};
use crate::controller::{Outcome, MSG_SPEECH_FAILED};
use crate::core::errors::TranslatorError;
use crate::core::models::SpeechCode;
use crate::core::speech::Synthesize;
use crate::platform::{Notification, Notifier, Player};

pub(crate) struct PlaybackRunner {
    synthesizer: Arc<dyn Synthesize>,
    player: Arc<dyn Player>,
    notifier: Arc<dyn Notifier>,
    sequence: Sequence,
}

impl PlaybackRunner {
    pub(crate) fn new(
        synthesizer: Arc<dyn Synthesize>,
        player: Arc<dyn Player>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            synthesizer,
            player,
            notifier,
            sequence: Sequence::default(),
        }
    }

    /// Mark playback in flight, synthesize `text`, play it to the end and
    /// return to idle. Only the latest request may touch the status.
    pub(crate) async fn run<S: PlaybackSlot>(
        &self,
        state: &watch::Sender<S>,
        text: String,
        language: SpeechCode,
    ) -> Outcome {
        let seq = self.sequence.next();
        state.send_modify(|s| *s.playback_mut() = OpStatus::InFlight { seq });
        debug!("Playback #{} started ({})", seq, language);

        let handle = match self.synthesizer.synthesize(&text, language).await {
            Ok(handle) => handle,
            Err(e) => return self.fail(state, seq, e),
        };

        if !state.borrow().playback().is_current(seq) {
            debug!("Playback #{} superseded, discarding audio", seq);
            return Outcome::Superseded;
        }

        if let Err(e) = self.player.play(handle).await {
            return self.fail(state, seq, e);
        }

        let applied = state.send_if_modified(|s| {
            if !s.playback().is_current(seq) {
                return false;
            }
            *s.playback_mut() = OpStatus::Idle;
            true
        });

        if applied {
            debug!("Playback #{} finished", seq);
            Outcome::Completed
        } else {
            Outcome::Superseded
        }
    }

    fn fail<S: PlaybackSlot>(&self, state: &watch::Sender<S>, seq: u64, err: TranslatorError) -> Outcome {
        error!("Speech playback #{} failed: {}", seq, err);

        let applied = state.send_if_modified(|s| {
            if !s.playback().is_current(seq) {
                return false;
            }
            *s.playback_mut() = OpStatus::Errored {
                message: err.to_string(),
            };
            true
        });

        if !applied {
            return Outcome::Superseded;
        }

        self.notifier.notify(Notification::error(MSG_SPEECH_FAILED));
        Outcome::Failed
    }
}
