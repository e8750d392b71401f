//! Turn controller - The interview's speak/listen/think state machine
//!
//! A single task owns the session state, the conversation log, the working
//! transcript and the silence timer. Commands from the presentation layer,
//! recognition events and completions of spawned work all arrive as messages
//! on channels, so no state is ever touched from two places at once.
//!
//! Every piece of spawned work (reply generation, playback, the re-arm delay)
//! is tagged with the phase number that was current when it was issued. A
//! completion is applied only if the phase and the expected state still match,
//! which is what makes `stop()` win over anything still in flight.

mod config;
mod handle;


use std::{fmt, mem, sync::Arc};

use domain::{ConversationLog, ConversationTurn, SessionState, SessionToken};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, error, info, trace, warn};

pub use config::{
    DEFAULT_FALLBACK_REPLY, DEFAULT_GREETING, DEFAULT_REARM_DELAY_MS, DEFAULT_SILENCE_TIMEOUT_MS,
    TurnControllerConfig,
};
pub use handle::{SessionSnapshot, TurnControllerHandle};

use super::{silence_endpointer::SilenceEndpointer, transcript_accumulator::TranscriptAccumulator};
use crate::{
    error::ApplicationError,
    ports::{
        GenerationRequest, RecognitionErrorKind, RecognitionEvent, RecognitionPort,
        RecognitionSink, ResponseGeneratorPort, SpeechPlayerPort,
    },
};

/// The three capabilities the controller drives
#[derive(Clone)]
pub struct TurnControllerPorts {
    /// Continuous speech recognition
    pub recognizer: Arc<dyn RecognitionPort>,
    /// Interviewer reply generation
    pub generator: Arc<dyn ResponseGeneratorPort>,
    /// Speech playback
    pub player: Arc<dyn SpeechPlayerPort>,
}

impl fmt::Debug for TurnControllerPorts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurnControllerPorts").finish_non_exhaustive()
    }
}

/// Requests from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Start,
    Stop,
    Submit,
    ResumeListening,
    Reset,
}

/// Completions of work the controller spawned
#[derive(Debug)]
enum Completion {
    SilenceElapsed {
        generation: u64,
    },
    ReplyReady {
        phase: u64,
        result: Result<String, ApplicationError>,
    },
    PlaybackFinished {
        phase: u64,
        outcome: Result<(), ApplicationError>,
    },
    RearmDue {
        phase: u64,
    },
}

/// Lifecycle of the recognizer as far as the controller knows it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecognizerStatus {
    /// No session running; a start is allowed
    Idle,
    /// A session was started and has not been stopped
    Running,
    /// `stop()` was issued; waiting for `SessionEnded`
    Stopping,
}

/// Turn-taking state machine for one interview session
pub struct TurnController {
    config: TurnControllerConfig,
    ports: TurnControllerPorts,
    session: SessionToken,

    state: SessionState,
    log: ConversationLog,
    accumulator: TranscriptAccumulator,
    endpointer: SilenceEndpointer,
    notice: Option<String>,

    phase: u64,
    recognizer: RecognizerStatus,
    recognition_session: u64,
    pending_arm: bool,

    playback_task: Option<JoinHandle<()>>,
    generation_task: Option<JoinHandle<()>>,
    rearm_task: Option<JoinHandle<()>>,

    commands: mpsc::UnboundedReceiver<Command>,
    recognition_tx: mpsc::UnboundedSender<(u64, RecognitionEvent)>,
    recognition_rx: mpsc::UnboundedReceiver<(u64, RecognitionEvent)>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    snapshots: watch::Sender<SessionSnapshot>,
}

impl fmt::Debug for TurnController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurnController")
            .field("session", &self.session)
            .field("state", &self.state)
            .field("turns", &self.log.len())
            .field("phase", &self.phase)
            .field("recognizer", &self.recognizer)
            .finish_non_exhaustive()
    }
}

impl TurnController {
    /// Create a controller and the handle used to drive it
    ///
    /// Nothing happens until [`TurnController::run`] is polled.
    pub fn new(
        config: TurnControllerConfig,
        ports: TurnControllerPorts,
        session: SessionToken,
    ) -> (Self, TurnControllerHandle) {
        let (command_tx, commands) = mpsc::unbounded_channel();
        let (recognition_tx, recognition_rx) = mpsc::unbounded_channel();
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let (snapshots, snapshot_rx) = watch::channel(SessionSnapshot::default());

        let timer_tx = completion_tx.clone();
        let endpointer = SilenceEndpointer::new(config.silence_timeout(), move |generation| {
            let _ = timer_tx.send(Completion::SilenceElapsed { generation });
        });

        let controller = Self {
            config,
            ports,
            session,
            state: SessionState::Idle,
            log: ConversationLog::new(),
            accumulator: TranscriptAccumulator::new(),
            endpointer,
            notice: None,
            phase: 0,
            recognizer: RecognizerStatus::Idle,
            recognition_session: 0,
            pending_arm: false,
            playback_task: None,
            generation_task: None,
            rearm_task: None,
            commands,
            recognition_tx,
            recognition_rx,
            completion_tx,
            completion_rx,
            snapshots,
        };

        (controller, TurnControllerHandle::new(command_tx, snapshot_rx))
    }

    /// Create a controller and run it on a new tokio task
    pub fn spawn(
        config: TurnControllerConfig,
        ports: TurnControllerPorts,
        session: SessionToken,
    ) -> (TurnControllerHandle, JoinHandle<()>) {
        let (controller, handle) = Self::new(config, ports, session);
        let task = tokio::spawn(controller.run());
        (handle, task)
    }

    /// Process messages until every handle has been dropped
    pub async fn run(mut self) {
        info!(session = %self.session, "Turn controller running");

        loop {
            tokio::select! {
                biased;

                command = self.commands.recv() => {
                    let Some(command) = command else {
                        debug!("All controller handles dropped, shutting down");
                        self.stop().await;
                        self.publish();
                        break;
                    };
                    self.handle_command(command).await;
                },
                Some((session, event)) = self.recognition_rx.recv() => {
                    self.handle_recognition(session, event).await;
                },
                Some(completion) = self.completion_rx.recv() => {
                    self.handle_completion(completion).await;
                },
            }

            self.publish();
        }

        info!(session = %self.session, turns = self.log.len(), "Turn controller finished");
    }

    async fn handle_command(&mut self, command: Command) {
        debug!(?command, state = %self.state, "Command received");
        match command {
            Command::Start => self.start().await,
            Command::Stop => self.stop().await,
            Command::Submit => self.submit().await,
            Command::ResumeListening => self.resume_listening().await,
            Command::Reset => self.reset(),
        }
    }

    async fn start(&mut self) {
        if self.state != SessionState::Idle {
            debug!(state = %self.state, "Start ignored outside idle");
            return;
        }

        if let Err(kind) = self.ports.recognizer.check_permission().await {
            if kind.is_fatal() {
                self.fail(kind).await;
                return;
            }
            warn!(error = %kind, "Recognition probe failed, starting anyway");
        }

        info!(session = %self.session, "Interview started");
        self.transition(SessionState::Greeting);
        let greeting = self.config.greeting.clone();
        self.say(greeting).await;
    }

    async fn stop(&mut self) {
        if self.state == SessionState::Ended {
            return;
        }
        info!(from = %self.state, turns = self.log.len(), "Interview stopped");
        self.transition(SessionState::Ended);
        self.halt().await;
    }

    async fn submit(&mut self) {
        if self.state != SessionState::Listening {
            debug!(state = %self.state, "Submit ignored outside listening");
            return;
        }
        self.finalize_turn().await;
    }

    async fn resume_listening(&mut self) {
        if self.state != SessionState::Listening {
            debug!(state = %self.state, "Resume ignored outside listening");
            return;
        }
        match self.recognizer {
            RecognizerStatus::Idle => self.start_recognizer().await,
            RecognizerStatus::Stopping => self.pending_arm = true,
            RecognizerStatus::Running => debug!("Recognizer already running"),
        }
    }

    fn reset(&mut self) {
        if !self.state.is_terminal() {
            debug!(state = %self.state, "Reset ignored outside a terminal state");
            return;
        }
        self.log.clear();
        self.accumulator.reset();
        self.notice = None;
        self.transition(SessionState::Idle);
    }

    async fn handle_recognition(&mut self, session: u64, event: RecognitionEvent) {
        if session != self.recognition_session {
            trace!(
                session,
                current = self.recognition_session,
                "Dropping event from a superseded recognition session"
            );
            return;
        }

        match event {
            RecognitionEvent::TranscriptUpdate { text, is_final } => {
                if self.state != SessionState::Listening {
                    trace!(state = %self.state, "Transcript ignored outside listening");
                    return;
                }
                if self.recognizer != RecognizerStatus::Running {
                    trace!(
                        recognizer = ?self.recognizer,
                        "Transcript from a stopped session dropped"
                    );
                    return;
                }
                self.accumulator.apply(text, is_final);
                if self.accumulator.utterance().is_some() {
                    self.endpointer.reset();
                } else {
                    self.endpointer.cancel();
                }
            },
            RecognitionEvent::Error(kind) if kind.is_fatal() => {
                if !self.state.is_terminal() {
                    self.fail(kind).await;
                }
            },
            RecognitionEvent::Error(kind) => {
                warn!(error = %kind, state = %self.state, "Recoverable recognition error");
            },
            RecognitionEvent::SessionEnded => self.on_recognition_ended().await,
        }
    }

    async fn on_recognition_ended(&mut self) {
        let previous = mem::replace(&mut self.recognizer, RecognizerStatus::Idle);
        debug!(session = self.recognition_session, ?previous, "Recognition session ended");

        if mem::take(&mut self.pending_arm) {
            if self.state == SessionState::Listening {
                self.start_recognizer().await;
            }
            return;
        }

        if self.state == SessionState::Listening && previous == RecognizerStatus::Running {
            debug!("Recognizer stopped on its own, restarting after settle delay");
            self.schedule_rearm();
        }
    }

    async fn handle_completion(&mut self, completion: Completion) {
        match completion {
            Completion::SilenceElapsed { generation } => {
                if self.state == SessionState::Listening && self.endpointer.take_fired(generation)
                {
                    debug!(generation, "Silence elapsed");
                    self.finalize_turn().await;
                }
            },
            Completion::ReplyReady { phase, result } => self.on_reply(phase, result).await,
            Completion::PlaybackFinished { phase, outcome } => {
                self.on_playback_finished(phase, outcome);
            },
            Completion::RearmDue { phase } => {
                if phase != self.phase {
                    trace!(phase, current = self.phase, "Stale re-arm dropped");
                    return;
                }
                self.rearm_task = None;
                match self.state {
                    SessionState::Greeting | SessionState::Speaking => self.arm_listening().await,
                    SessionState::Listening if self.recognizer == RecognizerStatus::Idle => {
                        self.start_recognizer().await;
                    },
                    _ => {},
                }
            },
        }
    }

    /// Close the candidate's turn and ask the interviewer for a reply
    async fn finalize_turn(&mut self) {
        let Some(utterance) = self.accumulator.utterance().map(str::to_string) else {
            debug!("Nothing heard yet, turn stays open");
            return;
        };

        self.endpointer.cancel();
        self.pending_arm = false;
        if let Some(task) = self.rearm_task.take() {
            task.abort();
        }
        self.stop_recognizer().await;

        let prior_turns = self.log.turns().to_vec();
        match ConversationTurn::user(utterance.as_str()) {
            Ok(turn) => self.log.append(turn),
            Err(e) => {
                warn!(error = %e, "Utterance rejected");
                return;
            },
        }
        self.accumulator.reset();

        self.transition(SessionState::Processing);
        self.phase += 1;
        let phase = self.phase;

        let request = GenerationRequest {
            session: self.session.clone(),
            utterance,
            prior_turns,
        };
        let generator = Arc::clone(&self.ports.generator);
        let tx = self.completion_tx.clone();
        self.generation_task = Some(tokio::spawn(async move {
            let result = generator.generate(&request).await;
            let _ = tx.send(Completion::ReplyReady { phase, result });
        }));
    }

    async fn on_reply(&mut self, phase: u64, result: Result<String, ApplicationError>) {
        if phase != self.phase || self.state != SessionState::Processing {
            trace!(phase, current = self.phase, state = %self.state, "Stale reply dropped");
            return;
        }
        self.generation_task = None;

        let reply = match result {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!("Interviewer returned an empty reply, using fallback line");
                self.config.fallback_reply.clone()
            },
            Err(e) => {
                warn!(error = %e, "Interviewer reply failed, using fallback line");
                self.config.fallback_reply.clone()
            },
        };

        self.transition(SessionState::Speaking);
        self.say(reply).await;
    }

    fn on_playback_finished(&mut self, phase: u64, outcome: Result<(), ApplicationError>) {
        if phase != self.phase || !self.state.is_playing() {
            trace!(
                phase,
                current = self.phase,
                state = %self.state,
                "Stale playback result dropped"
            );
            return;
        }
        self.playback_task = None;
        if let Err(e) = outcome {
            warn!(error = %e, "Playback failed, continuing as if it completed");
        }
        self.schedule_rearm();
    }

    /// Log an interviewer line and play it
    async fn say(&mut self, text: String) {
        match ConversationTurn::ai(text.as_str()) {
            Ok(turn) => self.log.append(turn),
            Err(e) => warn!(error = %e, "Interviewer line not logged"),
        }
        self.speak(text).await;
    }

    async fn speak(&mut self, text: String) {
        self.phase += 1;
        let phase = self.phase;
        self.ports.player.cancel().await;
        if let Some(task) = self.playback_task.take() {
            task.abort();
        }

        let player = Arc::clone(&self.ports.player);
        let tx = self.completion_tx.clone();
        self.playback_task = Some(tokio::spawn(async move {
            let outcome = player.speak(&text).await;
            let _ = tx.send(Completion::PlaybackFinished { phase, outcome });
        }));
    }

    async fn cancel_playback(&mut self) {
        if let Some(task) = self.playback_task.take() {
            self.ports.player.cancel().await;
            task.abort();
        }
    }

    fn schedule_rearm(&mut self) {
        if let Some(task) = self.rearm_task.take() {
            task.abort();
        }
        let phase = self.phase;
        let delay = self.config.rearm_delay();
        let tx = self.completion_tx.clone();
        self.rearm_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Completion::RearmDue { phase });
        }));
    }

    /// Enter Listening with a fresh transcript and a running recognizer
    async fn arm_listening(&mut self) {
        self.accumulator.reset();
        self.endpointer.cancel();
        self.transition(SessionState::Listening);

        match self.recognizer {
            RecognizerStatus::Idle => self.start_recognizer().await,
            RecognizerStatus::Stopping => {
                debug!("Previous recognition session still closing, deferring start");
                self.pending_arm = true;
            },
            RecognizerStatus::Running => debug!("Recognizer already running"),
        }
    }

    async fn start_recognizer(&mut self) {
        self.recognition_session += 1;
        let sink = RecognitionSink::new(self.recognition_session, self.recognition_tx.clone());

        match self.ports.recognizer.start(sink).await {
            Ok(()) => {
                self.recognizer = RecognizerStatus::Running;
                debug!(session = self.recognition_session, "Recognizer started");
            },
            Err(kind) if kind.is_fatal() => self.fail(kind).await,
            Err(kind) => {
                warn!(error = %kind, "Recognizer did not start, waiting for resume");
            },
        }
    }

    async fn stop_recognizer(&mut self) {
        if self.recognizer == RecognizerStatus::Running {
            self.recognizer = RecognizerStatus::Stopping;
            self.ports.recognizer.stop().await;
        }
    }

    async fn fail(&mut self, kind: RecognitionErrorKind) {
        error!(error = %kind, state = %self.state, "Fatal recognition failure");
        self.notice = Some(
            kind.user_notice()
                .map_or_else(|| kind.to_string(), str::to_string),
        );
        self.transition(SessionState::Error);
        self.halt().await;
    }

    /// Invalidate in-flight work and release the microphone and speaker
    async fn halt(&mut self) {
        self.phase += 1;
        self.endpointer.cancel();
        self.pending_arm = false;
        for task in [self.generation_task.take(), self.rearm_task.take()]
            .into_iter()
            .flatten()
        {
            task.abort();
        }
        self.stop_recognizer().await;
        self.cancel_playback().await;
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            info!(from = %self.state, to = %next, "Session state changed");
            self.state = next;
        }
    }

    fn publish(&self) {
        self.snapshots.send_if_modified(|current| {
            let mut modified = false;
            if current.state != self.state {
                current.state = self.state;
                modified = true;
            }
            // The log only grows or clears, so length and last turn identify it
            if current.turns.len() != self.log.len()
                || current.turns.last() != self.log.last()
            {
                current.turns = self.log.turns().to_vec();
                modified = true;
            }
            if current.transcript != *self.accumulator.transcript() {
                current.transcript.clone_from(self.accumulator.transcript());
                modified = true;
            }
            if current.notice != self.notice {
                current.notice.clone_from(&self.notice);
                modified = true;
            }
            modified
        });
    }
}
