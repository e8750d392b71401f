//! Recognition port - Interface for continuous speech recognition

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use tokio::sync::mpsc;

/// Failure reported by a recognition capability
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecognitionErrorKind {
    /// Microphone access was refused
    #[error("microphone permission denied")]
    PermissionDenied,

    /// No recognition capability exists on this device
    #[error("speech recognition unsupported")]
    Unsupported,

    /// Recoverable hiccup such as "no speech detected"
    #[error("transient recognition failure: {0}")]
    Transient(String),
}

impl RecognitionErrorKind {
    /// Whether the session cannot continue after this failure
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::Unsupported)
    }

    /// Notice shown to the candidate when the failure is fatal
    pub const fn user_notice(&self) -> Option<&'static str> {
        match self {
            Self::PermissionDenied => {
                Some("Microphone access denied. Please allow microphone permissions.")
            },
            Self::Unsupported => Some("Speech recognition is not supported on this device."),
            Self::Transient(_) => None,
        }
    }
}

/// Event emitted by a running recognition session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Full cumulative text of the current utterance
    TranscriptUpdate {
        /// Recognized text so far
        text: String,
        /// Whether the recognizer considers this result final
        is_final: bool,
    },
    /// The recognition session is over; a new one may be started
    SessionEnded,
    /// The recognizer reported a failure
    Error(RecognitionErrorKind),
}

/// Delivery handle given to the recognizer for one recognition session
///
/// Each session gets its own number, so events from a session the
/// controller has already left behind are recognized and dropped.
#[derive(Debug, Clone)]
pub struct RecognitionSink {
    session: u64,
    tx: mpsc::UnboundedSender<(u64, RecognitionEvent)>,
}

impl RecognitionSink {
    /// Create a sink for the given recognition session
    pub fn new(session: u64, tx: mpsc::UnboundedSender<(u64, RecognitionEvent)>) -> Self {
        Self { session, tx }
    }

    /// Recognition session this sink belongs to
    pub const fn session(&self) -> u64 {
        self.session
    }

    /// Deliver an event; returns `false` once nobody listens anymore
    pub fn emit(&self, event: RecognitionEvent) -> bool {
        self.tx.send((self.session, event)).is_ok()
    }

    /// Deliver a transcript update
    pub fn transcript(&self, text: impl Into<String>, is_final: bool) -> bool {
        self.emit(RecognitionEvent::TranscriptUpdate {
            text: text.into(),
            is_final,
        })
    }

    /// Report that the recognition session has ended
    pub fn ended(&self) -> bool {
        self.emit(RecognitionEvent::SessionEnded)
    }

    /// Report a recognition failure
    pub fn error(&self, kind: RecognitionErrorKind) -> bool {
        self.emit(RecognitionEvent::Error(kind))
    }
}

/// Port for continuous speech recognition
///
/// Implementations must emit `SessionEnded` after every `stop()` and after
/// any natural termination. Events may still trickle in after `stop()`; the
/// controller filters them, so implementations need not.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecognitionPort: Send + Sync {
    /// Probe whether the microphone may be used
    ///
    /// Called once when the interview starts, before the greeting plays.
    async fn check_permission(&self) -> Result<(), RecognitionErrorKind> {
        Ok(())
    }

    /// Begin a recognition session that reports through `sink`
    async fn start(&self, sink: RecognitionSink) -> Result<(), RecognitionErrorKind>;

    /// End the running recognition session
    async fn stop(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_kinds_have_notices() {
        assert!(RecognitionErrorKind::PermissionDenied.is_fatal());
        assert!(RecognitionErrorKind::Unsupported.is_fatal());
        assert!(RecognitionErrorKind::PermissionDenied.user_notice().is_some());
        assert!(RecognitionErrorKind::Unsupported.user_notice().is_some());
    }

    #[test]
    fn transient_kind_has_no_notice() {
        let kind = RecognitionErrorKind::Transient("no-speech".into());
        assert!(!kind.is_fatal());
        assert!(kind.user_notice().is_none());
    }

    #[tokio::test]
    async fn sink_tags_events_with_session() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = RecognitionSink::new(7, tx);

        assert!(sink.transcript("hello", false));
        assert!(sink.ended());

        assert_eq!(
            rx.recv().await,
            Some((
                7,
                RecognitionEvent::TranscriptUpdate {
                    text: "hello".to_string(),
                    is_final: false,
                }
            ))
        );
        assert_eq!(rx.recv().await, Some((7, RecognitionEvent::SessionEnded)));
    }

    #[test]
    fn sink_reports_closed_channel() {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink = RecognitionSink::new(1, tx);
        drop(rx);
        assert!(!sink.error(RecognitionErrorKind::Unsupported));
    }

    #[tokio::test]
    async fn mock_permission_probe() {
        let mut mock = MockRecognitionPort::new();
        mock.expect_check_permission()
            .returning(|| Err(RecognitionErrorKind::PermissionDenied));

        assert_eq!(
            mock.check_permission().await,
            Err(RecognitionErrorKind::PermissionDenied)
        );
    }
}
