//! Port definitions for speech capabilities
//!
//! Defines the traits (ports) that recognition and speech output adapters
//! must implement.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::SpeechError;
use crate::types::{RecognitionUpdate, UtteranceSettings, VoiceInfo};

/// Port for continuous speech recognition
///
/// While active, the recognizer sends the full cumulative transcript of the
/// session on every change. It must send [`RecognitionUpdate::Ended`] after
/// every `stop()` and whenever the session ends on its own.
#[async_trait]
pub trait ContinuousRecognizer: Send + Sync {
    /// Check whether the microphone may be used
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::PermissionDenied` or `SpeechError::Unsupported`
    /// when recognition cannot work at all.
    async fn check_permission(&self) -> Result<(), SpeechError> {
        Ok(())
    }

    /// Begin a recognition session that reports through `updates`
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::AlreadyActive` if a session is running.
    async fn start(&self, updates: mpsc::UnboundedSender<RecognitionUpdate>)
    -> Result<(), SpeechError>;

    /// End the running session, if any
    async fn stop(&self);
}

/// Port for speaking text out loud
#[async_trait]
pub trait SpeechOutput: Send + Sync {
    /// Speak `text`, resolving when playback is over
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Cancelled` if `cancel()` cut the line off.
    async fn speak(&self, text: &str, settings: &UtteranceSettings) -> Result<(), SpeechError>;

    /// Cut off the line being spoken, if any
    async fn cancel(&self);

    /// Voices this output can use
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if the catalog cannot be read.
    async fn voices(&self) -> Result<Vec<VoiceInfo>, SpeechError>;
}
