//! Speech capability errors

use thiserror::Error;

/// Errors that can occur in recognition or speech output
#[derive(Debug, Error)]
pub enum SpeechError {
    /// The user refused microphone access
    #[error("Microphone permission denied")]
    PermissionDenied,

    /// The capability does not exist on this device
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Nothing was heard
    #[error("No speech detected")]
    NoSpeech,

    /// A recognition session is already running
    #[error("Recognition already active")]
    AlreadyActive,

    /// Playback was cut off by `cancel()`
    #[error("Playback cancelled")]
    Cancelled,

    /// Playback could not be completed
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// Console or device I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpeechError {
    /// Whether the capability cannot be used at all
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::Unsupported(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_error_message() {
        assert_eq!(
            SpeechError::PermissionDenied.to_string(),
            "Microphone permission denied"
        );
    }

    #[test]
    fn playback_failed_error_message() {
        let err = SpeechError::PlaybackFailed("device busy".to_string());
        assert_eq!(err.to_string(), "Playback failed: device busy");
    }

    #[test]
    fn io_error_converts() {
        let err: SpeechError = std::io::Error::other("broken pipe").into();
        assert!(matches!(err, SpeechError::Io(_)));
        assert!(!err.is_fatal());
    }

    #[test]
    fn fatal_kinds() {
        assert!(SpeechError::PermissionDenied.is_fatal());
        assert!(SpeechError::Unsupported("no microphone".into()).is_fatal());
        assert!(!SpeechError::NoSpeech.is_fatal());
        assert!(!SpeechError::AlreadyActive.is_fatal());
    }
}
