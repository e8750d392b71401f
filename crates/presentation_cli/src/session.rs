//! Runs one interview session on the terminal

use std::{sync::Arc, time::Duration};

use ai_core::build_interviewer;
use ai_speech::{ConsoleRecognizer, ConsoleSpeaker};
use application::{
    SessionBootstrapPort, SessionSnapshot, TurnController, TurnControllerHandle,
    TurnControllerPorts,
};
use infrastructure::{
    AppConfig, InterviewerAdapter, RecognitionAdapter, SpeechPlayerAdapter,
    StaticSessionBootstrap,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::{debug, info, warn};

use crate::console::{ConsoleInput, SnapshotPrinter};

/// Run an interview until it ends or fails
///
/// Returns the final snapshot.
pub async fn run(
    config: &AppConfig,
    session_token: Option<String>,
) -> anyhow::Result<SessionSnapshot> {
    let session = StaticSessionBootstrap::new(session_token)
        .open_session()
        .await?;
    info!(session = %session, "Starting interview");

    let (recognizer, speech_input) =
        ConsoleRecognizer::channel(Duration::from_millis(config.speech.word_interval_ms));
    let speaker = ConsoleSpeaker::stdout(config.speech.voices.clone());
    let engine = build_interviewer(&config.interviewer)?;

    let ports = TurnControllerPorts {
        recognizer: Arc::new(RecognitionAdapter::new(Arc::new(recognizer))),
        generator: Arc::new(InterviewerAdapter::new(engine)),
        player: Arc::new(SpeechPlayerAdapter::new(Arc::new(speaker), &config.speech).await),
    };

    let (handle, controller) = TurnController::spawn(config.interview.clone(), ports, session);
    handle.start()?;
    let reader = tokio::spawn(read_input(handle.clone(), speech_input));
    let outcome = watch_session(&handle).await;

    reader.abort();
    drop(handle);
    if let Err(e) = controller.await {
        warn!(error = %e, "Turn controller task failed");
    }
    outcome
}

/// Print snapshot changes until the session is over
async fn watch_session(handle: &TurnControllerHandle) -> anyhow::Result<SessionSnapshot> {
    let mut snapshots = handle.subscribe();
    let mut printer = SnapshotPrinter::new();

    loop {
        let snapshot = snapshots.borrow_and_update().clone();
        for line in printer.render(&snapshot) {
            println!("{line}");
        }
        if snapshot.state.is_terminal() {
            return Ok(snapshot);
        }

        tokio::select! {
            changed = snapshots.changed() => changed?,
            result = tokio::signal::ctrl_c() => {
                result?;
                info!("Interrupted, ending interview");
                handle.stop()?;
            },
        }
    }
}

/// Feed terminal lines to the recognizer and the controller
///
/// End of input stops the interview.
async fn read_input(handle: TurnControllerHandle, speech: mpsc::UnboundedSender<String>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Failed to read terminal input");
                break;
            },
        };

        let sent = match ConsoleInput::parse(&line) {
            ConsoleInput::Speech(text) => speech.send(text).is_ok(),
            ConsoleInput::Submit => handle.submit().is_ok(),
            ConsoleInput::Resume => handle.resume_listening().is_ok(),
            ConsoleInput::Stop => handle.stop().is_ok(),
            ConsoleInput::Unknown(command) => {
                println!("Unknown command {command}. Try /submit, /resume or /stop.");
                true
            },
            ConsoleInput::Blank => true,
        };
        if !sent {
            break;
        }
    }

    debug!("Terminal input closed");
    let _ = handle.stop();
}
