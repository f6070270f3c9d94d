mod common;

use common::{Harness, Reply};
use speech_translator::controller::{Outcome, MSG_EMPTY_SPEECH_INPUT, MSG_SPEECH_FAILED};
use speech_translator::platform::Notification;
use speech_translator::{Language, OpStatus, SpeechCode, SpeechController};

#[tokio::test]
async fn test_speak_defaults_to_mongolian() {
    let harness = Harness::new(vec![], vec![Reply::ok("https://audio.test/mn.wav")]);
    let controller = SpeechController::new(harness.services());
    controller.set_input("Сайн уу");

    assert_eq!(controller.submit_playback().await, Outcome::Completed);
    assert_eq!(
        harness.synthesizer.calls(),
        vec![("Сайн уу".to_string(), SpeechCode::Mon)]
    );
    assert_eq!(controller.snapshot().playback, OpStatus::Idle);
}

#[tokio::test]
async fn test_selected_language_is_mapped() {
    let harness = Harness::new(vec![], vec![Reply::ok("https://audio.test/hi.wav")]);
    let controller = SpeechController::new(harness.services());
    controller.set_language(Language::Hindi);
    controller.set_input("नमस्ते");

    controller.submit_playback().await;
    assert_eq!(harness.synthesizer.calls()[0].1, SpeechCode::Hin);
}

#[tokio::test]
async fn test_blank_input_rejected_without_call() {
    let harness = Harness::new(vec![], vec![]);
    let controller = SpeechController::new(harness.services());
    controller.set_input("  \n");
    let before = controller.snapshot();

    assert_eq!(controller.submit_playback().await, Outcome::Rejected);
    assert!(harness.synthesizer.calls().is_empty());
    assert_eq!(controller.snapshot(), before);
    assert_eq!(
        harness.notifier.notes(),
        vec![Notification::validation(MSG_EMPTY_SPEECH_INPUT)]
    );
}

#[tokio::test]
async fn test_failure_returns_to_idle_state() {
    let harness = Harness::new(vec![], vec![Reply::server_error(500, "quota exceeded")]);
    let controller = SpeechController::new(harness.services());
    controller.set_input("hello");
    controller.set_language(Language::English);

    assert_eq!(controller.submit_playback().await, Outcome::Failed);
    assert!(!controller.snapshot().is_playing());
    assert_eq!(
        harness.notifier.notes(),
        vec![Notification::error(MSG_SPEECH_FAILED)]
    );

    // The user can retry manually
    let harness = Harness::new(vec![], vec![Reply::ok("https://audio.test/ok")]);
    let controller = SpeechController::new(harness.services());
    controller.set_input("hello");
    assert_eq!(controller.submit_playback().await, Outcome::Completed);
}

#[tokio::test]
async fn test_stale_audio_is_not_played() {
    let (slow, gate) = Reply::ok("https://audio.test/old").gated();
    let harness = Harness::new(vec![], vec![slow, Reply::ok("https://audio.test/new")]);
    let controller = SpeechController::new(harness.services());
    controller.set_input("old");

    let mut rx = controller.subscribe();
    let (first, second) = tokio::join!(controller.submit_playback(), async {
        rx.wait_for(|s| s.is_playing()).await.unwrap();
        controller.set_input("new");
        let outcome = controller.submit_playback().await;
        gate.add_permits(1);
        outcome
    });

    assert_eq!(second, Outcome::Completed);
    assert_eq!(first, Outcome::Superseded);
    assert_eq!(
        *harness.player.played.lock().unwrap(),
        vec!["https://audio.test/new".to_string()]
    );
}
