//! Application-level errors

use domain::DomainError;
use thiserror::Error;

use crate::ports::RecognitionErrorKind;

/// Errors that can occur in the application layer
///
/// Adapters convert their own error types into one of these variants at the
/// port boundary, so no adapter-specific error reaches the controller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Speech recognition failed
    #[error("Recognition error: {0}")]
    Recognition(RecognitionErrorKind),

    /// The interviewer could not produce a reply
    #[error("Response generation failed: {0}")]
    Generation(String),

    /// Speech playback failed
    #[error("Playback failed: {0}")]
    Playback(String),

    /// The session could not be bootstrapped
    #[error("Session bootstrap failed: {0}")]
    Bootstrap(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The turn controller task is no longer running
    #[error("Turn controller is no longer running")]
    ControllerUnavailable,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error must end the session
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Recognition(kind) if kind.is_fatal())
    }
}

impl From<RecognitionErrorKind> for ApplicationError {
    fn from(kind: RecognitionErrorKind) -> Self {
        Self::Recognition(kind)
    }
}
