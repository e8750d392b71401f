//! Handle for talking to a running turn controller

use domain::{ConversationTurn, SessionState, WorkingTranscript};
use tokio::sync::{mpsc, watch};

use super::Command;
use crate::error::ApplicationError;

/// What the presentation layer sees of a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Current phase
    pub state: SessionState,
    /// Conversation so far, oldest first
    pub turns: Vec<ConversationTurn>,
    /// Utterance being heard right now
    pub transcript: WorkingTranscript,
    /// User-facing message after a fatal failure
    pub notice: Option<String>,
}

/// Cloneable handle to a [`TurnController`](super::TurnController) task
///
/// Commands are queued and applied in order by the controller task. They
/// fail only when that task is gone.
#[derive(Debug, Clone)]
pub struct TurnControllerHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl TurnControllerHandle {
    pub(super) const fn new(
        commands: mpsc::UnboundedSender<Command>,
        snapshots: watch::Receiver<SessionSnapshot>,
    ) -> Self {
        Self {
            commands,
            snapshots,
        }
    }

    fn send(&self, command: Command) -> Result<(), ApplicationError> {
        self.commands
            .send(command)
            .map_err(|_| ApplicationError::ControllerUnavailable)
    }

    /// Begin the interview with the greeting
    pub fn start(&self) -> Result<(), ApplicationError> {
        self.send(Command::Start)
    }

    /// End the interview and release the microphone and speaker
    pub fn stop(&self) -> Result<(), ApplicationError> {
        self.send(Command::Stop)
    }

    /// Close the candidate's turn without waiting for silence
    pub fn submit(&self) -> Result<(), ApplicationError> {
        self.send(Command::Submit)
    }

    /// Retry starting the recognizer while listening
    pub fn resume_listening(&self) -> Result<(), ApplicationError> {
        self.send(Command::ResumeListening)
    }

    /// Return a finished session to idle
    pub fn reset(&self) -> Result<(), ApplicationError> {
        self.send(Command::Reset)
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Latest published state
    pub fn state(&self) -> SessionState {
        self.snapshots.borrow().state
    }

    /// Receiver that is notified on every snapshot change
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    /// Wait until a published snapshot satisfies `predicate`
    ///
    /// Checks the current snapshot first.
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&SessionSnapshot) -> bool,
    ) -> Result<SessionSnapshot, ApplicationError> {
        let mut snapshots = self.snapshots.clone();
        let snapshot = snapshots
            .wait_for(predicate)
            .await
            .map_err(|_| ApplicationError::ControllerUnavailable)?
            .clone();
        Ok(snapshot)
    }
}
