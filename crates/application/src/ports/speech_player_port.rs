//! Speech player port - Interface for speaking text out loud

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for speech playback
///
/// `cancel()` must make any in-flight `speak()` resolve promptly. The
/// controller cancels before every new `speak()` and never has two calls
/// outstanding.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechPlayerPort: Send + Sync {
    /// Speak `text`, resolving when playback completes or fails
    async fn speak(&self, text: &str) -> Result<(), ApplicationError>;

    /// Abort the current playback, if any
    async fn cancel(&self);
}
