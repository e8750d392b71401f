//! End-to-end interview flow over the console providers
//!
//! Wires the turn controller to the real adapters, the console recognizer
//! and speaker, and the scripted interviewer. Time is paused, so speaking
//! and silence timers complete instantly.

use std::{
    io::Write,
    sync::Arc,
    time::Duration,
};

use ai_core::build_interviewer;
use ai_speech::{ConsoleRecognizer, ConsoleSpeaker};
use application::{
    SessionBootstrapPort, TurnController, TurnControllerHandle, TurnControllerPorts,
    DEFAULT_GREETING,
};
use domain::{SessionState, TurnRole};
use infrastructure::{
    AppConfig, InterviewerAdapter, RecognitionAdapter, SpeechPlayerAdapter,
    StaticSessionBootstrap,
};
use parking_lot::Mutex;
use tokio::sync::mpsc;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

struct Interview {
    handle: TurnControllerHandle,
    input: mpsc::UnboundedSender<String>,
    printed: SharedBuffer,
}

async fn start_interview(config: &AppConfig) -> Interview {
    let (recognizer, input) =
        ConsoleRecognizer::channel(Duration::from_millis(config.speech.word_interval_ms));
    let printed = SharedBuffer::default();
    let speaker = ConsoleSpeaker::new(config.speech.voices.clone(), printed.clone());

    let engine = build_interviewer(&config.interviewer).unwrap();
    let ports = TurnControllerPorts {
        recognizer: Arc::new(RecognitionAdapter::new(Arc::new(recognizer))),
        generator: Arc::new(InterviewerAdapter::new(engine)),
        player: Arc::new(SpeechPlayerAdapter::new(Arc::new(speaker), &config.speech).await),
    };
    let session = StaticSessionBootstrap::new(None).open_session().await.unwrap();

    let (handle, _task) = TurnController::spawn(config.interview.clone(), ports, session);
    handle.start().unwrap();

    Interview {
        handle,
        input,
        printed,
    }
}

#[tokio::test(start_paused = true)]
async fn greeting_answer_and_follow_up() {
    let config = AppConfig::default();
    let interview = start_interview(&config).await;

    interview
        .handle
        .wait_for(|s| s.state == SessionState::Listening)
        .await
        .unwrap();
    interview
        .input
        .send("I have five years of Rust experience".to_string())
        .unwrap();

    let snapshot = interview
        .handle
        .wait_for(|s| s.state == SessionState::Listening && s.turns.len() == 3)
        .await
        .unwrap();

    let roles: Vec<TurnRole> = snapshot.turns.iter().map(|t| t.role()).collect();
    assert_eq!(roles, vec![TurnRole::Ai, TurnRole::User, TurnRole::Ai]);
    assert_eq!(snapshot.turns[0].text(), DEFAULT_GREETING);
    assert_eq!(
        snapshot.turns[1].text(),
        "I have five years of Rust experience"
    );
    assert_eq!(snapshot.turns[2].text(), config.interviewer.scripted_questions[0]);

    let printed = interview.printed.contents();
    assert!(printed.starts_with(&format!("[Google UK English Female] {DEFAULT_GREETING}")));
    assert!(printed.contains(&config.interviewer.scripted_questions[0]));

    interview.handle.stop().unwrap();
    interview
        .handle
        .wait_for(|s| s.state == SessionState::Ended)
        .await
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn two_lines_before_silence_form_one_turn() {
    let config = AppConfig::default();
    let interview = start_interview(&config).await;

    interview
        .handle
        .wait_for(|s| s.state == SessionState::Listening)
        .await
        .unwrap();
    interview.input.send("I mostly write".to_string()).unwrap();
    interview
        .handle
        .wait_for(|s| s.transcript.text() == "I mostly write")
        .await
        .unwrap();
    interview.input.send("network services".to_string()).unwrap();

    let snapshot = interview
        .handle
        .wait_for(|s| s.turns.len() == 3)
        .await
        .unwrap();
    assert_eq!(snapshot.turns[1].text(), "I mostly write network services");
}

#[tokio::test(start_paused = true)]
async fn typing_during_the_greeting_is_not_heard() {
    let config = AppConfig::default();
    let interview = start_interview(&config).await;

    interview
        .handle
        .wait_for(|s| s.state == SessionState::Greeting)
        .await
        .unwrap();
    interview.input.send("too early".to_string()).unwrap();

    interview
        .handle
        .wait_for(|s| s.state == SessionState::Listening)
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;

    let snapshot = interview.handle.snapshot();
    assert_eq!(snapshot.state, SessionState::Listening);
    assert_eq!(snapshot.turns.len(), 1);
    assert!(snapshot.transcript.text().is_empty());
}

#[tokio::test(start_paused = true)]
async fn closed_console_input_keeps_session_listening() {
    let config = AppConfig::default();
    let interview = start_interview(&config).await;

    interview
        .handle
        .wait_for(|s| s.state == SessionState::Listening)
        .await
        .unwrap();
    drop(interview.input);
    tokio::time::sleep(Duration::from_secs(5)).await;

    // end of input is not a fatal recognition failure
    assert_eq!(interview.handle.state(), SessionState::Listening);
    interview.handle.stop().unwrap();
    interview
        .handle
        .wait_for(|s| s.state == SessionState::Ended)
        .await
        .unwrap();
}
