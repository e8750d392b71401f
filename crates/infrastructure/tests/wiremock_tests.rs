//! Wiremock tests for the remote interviewer wired into a live session
//!
//! These run on real time with short timings, since the HTTP round trip
//! cannot be driven by a paused clock.

use std::{sync::Arc, time::Duration};

use ai_core::{InterviewerConfig, build_interviewer};
use ai_speech::{ConsoleRecognizer, ConsoleSpeaker, SpeechConfig};
use application::{
    DEFAULT_FALLBACK_REPLY, SessionSnapshot, TurnController, TurnControllerConfig,
    TurnControllerHandle, TurnControllerPorts,
};
use domain::{SessionState, SessionToken};
use infrastructure::{InterviewerAdapter, RecognitionAdapter, SpeechPlayerAdapter};
use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(10);

async fn session(base_url: String) -> (TurnControllerHandle, mpsc::UnboundedSender<String>) {
    let interview = TurnControllerConfig {
        silence_timeout_ms: 150,
        rearm_delay_ms: 20,
        ..Default::default()
    };
    let speech = SpeechConfig {
        rate: 50.0,
        word_interval_ms: 5,
        ..Default::default()
    };
    let interviewer = InterviewerConfig {
        base_url: Some(base_url),
        timeout_ms: 2_000,
        ..Default::default()
    };

    let (recognizer, input) =
        ConsoleRecognizer::channel(Duration::from_millis(speech.word_interval_ms));
    let speaker = ConsoleSpeaker::new(speech.voices.clone(), std::io::sink());
    let ports = TurnControllerPorts {
        recognizer: Arc::new(RecognitionAdapter::new(Arc::new(recognizer))),
        generator: Arc::new(InterviewerAdapter::new(
            build_interviewer(&interviewer).unwrap(),
        )),
        player: Arc::new(SpeechPlayerAdapter::new(Arc::new(speaker), &speech).await),
    };

    let (handle, _task) =
        TurnController::spawn(interview, ports, SessionToken::new("resume-42"));
    handle.start().unwrap();
    (handle, input)
}

async fn wait_for(
    handle: &TurnControllerHandle,
    predicate: impl FnMut(&SessionSnapshot) -> bool,
) -> SessionSnapshot {
    tokio::time::timeout(WAIT, handle.wait_for(predicate))
        .await
        .expect("session did not reach the expected snapshot")
        .unwrap()
}

#[tokio::test]
async fn remote_reply_is_spoken_and_logged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .and(body_json(json!({
            "sessionId": "resume-42",
            "text": "I maintain a Rust database driver"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": "What was the trickiest bug?" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (handle, input) = session(server.uri()).await;
    wait_for(&handle, |s| s.state == SessionState::Listening).await;
    input
        .send("I maintain a Rust database driver".to_string())
        .unwrap();

    let snapshot = wait_for(&handle, |s| {
        s.state == SessionState::Listening && s.turns.len() == 3
    })
    .await;
    assert_eq!(snapshot.turns[2].text(), "What was the trickiest bug?");

    handle.stop().unwrap();
    wait_for(&handle, |s| s.state == SessionState::Ended).await;
}

#[tokio::test]
async fn server_error_falls_back_and_keeps_listening() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let (handle, input) = session(server.uri()).await;
    wait_for(&handle, |s| s.state == SessionState::Listening).await;
    input.send("Hello".to_string()).unwrap();

    let snapshot = wait_for(&handle, |s| {
        s.state == SessionState::Listening && s.turns.len() == 3
    })
    .await;
    assert_eq!(snapshot.turns[2].text(), DEFAULT_FALLBACK_REPLY);
    assert!(snapshot.notice.is_none());
}
