mod common;

use std::sync::Arc;

use assert_json_diff::assert_json_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{FakeClipboard, FakePlayer, RecordingNotifier};
use speech_translator::controller::{Outcome, Services, MSG_SPEECH_FAILED};
use speech_translator::platform::Notification;
use speech_translator::{build_synthesizer, build_translator, TranslatorConfig, TranslatorController};

struct Wired {
    controller: TranslatorController,
    player: Arc<FakePlayer>,
    notifier: Arc<RecordingNotifier>,
}

fn wire(server: &MockServer) -> Wired {
    let config = TranslatorConfig::for_backend(server.uri());
    let player = Arc::new(FakePlayer::default());
    let notifier = Arc::new(RecordingNotifier::default());

    let services = Services {
        translator: build_translator(&config).unwrap(),
        synthesizer: build_synthesizer(&config).unwrap(),
        player: player.clone(),
        clipboard: Arc::new(FakeClipboard::default()),
        notifier: notifier.clone(),
    };

    Wired {
        controller: TranslatorController::new(services),
        player,
        notifier,
    }
}

#[tokio::test]
async fn test_translate_then_speak_against_backend() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_json(json!({"text": "Hello", "target_lang": "mn", "source_lang": "en"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"translated": "Сайн байна уу"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/tts"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "audio/wav")
                .set_body_bytes(b"RIFF....WAVE".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let wired = wire(&server);
    wired.controller.set_input("Hello");

    assert_eq!(wired.controller.submit_translation().await, Outcome::Completed);
    let state = wired.controller.snapshot();
    assert_eq!(state.translated_text, "Сайн байна уу");
    assert!(!state.is_translating());

    assert_eq!(wired.controller.submit_playback().await, Outcome::Completed);
    assert!(!wired.controller.snapshot().is_playing());

    let played = wired.player.played.lock().unwrap().clone();
    assert_eq!(played.len(), 1);
    assert!(played[0].ends_with(".wav"));

    let requests = server.received_requests().await.unwrap();
    let tts = requests
        .iter()
        .find(|r| r.url.path() == "/tts")
        .expect("tts request");
    let body: serde_json::Value = serde_json::from_slice(&tts.body).unwrap();
    assert_json_eq!(body, json!({"text": "Сайн байна уу", "language_id": "mon"}));
}

#[tokio::test]
async fn test_quota_exceeded_surfaces_notification() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"translated": "Сайн байна уу"})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/tts"))
        .respond_with(ResponseTemplate::new(500).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let wired = wire(&server);
    wired.controller.set_input("Hello");
    wired.controller.submit_translation().await;

    assert_eq!(wired.controller.submit_playback().await, Outcome::Failed);

    let state = wired.controller.snapshot();
    assert!(!state.is_playing());
    assert_eq!(
        state.playback.error_message(),
        Some("Server error: 500 - quota exceeded")
    );
    assert_eq!(
        wired.notifier.notes().last(),
        Some(&Notification::error(MSG_SPEECH_FAILED))
    );
    assert!(wired.player.played.lock().unwrap().is_empty());
}
