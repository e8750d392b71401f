//! Recognition adapter - Implements RecognitionPort using ai_speech crate

use std::{fmt, sync::Arc};

use ai_speech::{ContinuousRecognizer, RecognitionUpdate, SpeechError};
use application::ports::{RecognitionErrorKind, RecognitionPort, RecognitionSink};
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, instrument, trace};

/// Adapter for continuous recognizers from the ai_speech crate
///
/// Every session gets its own update channel and a forwarding task that
/// relays updates into the session's sink until the recognizer reports the
/// end of the session.
pub struct RecognitionAdapter {
    recognizer: Arc<dyn ContinuousRecognizer>,
}

impl fmt::Debug for RecognitionAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecognitionAdapter").finish_non_exhaustive()
    }
}

impl RecognitionAdapter {
    /// Create a new recognition adapter
    pub fn new(recognizer: Arc<dyn ContinuousRecognizer>) -> Self {
        Self { recognizer }
    }

    /// Map speech error to recognition failure
    fn map_error(err: SpeechError) -> RecognitionErrorKind {
        match err {
            SpeechError::PermissionDenied => RecognitionErrorKind::PermissionDenied,
            SpeechError::Unsupported(_) => RecognitionErrorKind::Unsupported,
            other => RecognitionErrorKind::Transient(other.to_string()),
        }
    }
}

async fn forward(mut updates: mpsc::UnboundedReceiver<RecognitionUpdate>, sink: RecognitionSink) {
    while let Some(update) = updates.recv().await {
        let delivered = match update {
            RecognitionUpdate::Transcript { text, is_final } => {
                trace!(session = sink.session(), is_final, "Forwarding transcript");
                sink.transcript(text, is_final)
            },
            RecognitionUpdate::Failed(err) => sink.error(RecognitionAdapter::map_error(err)),
            RecognitionUpdate::Ended => {
                sink.ended();
                break;
            },
        };
        if !delivered {
            break;
        }
    }
    debug!(session = sink.session(), "Recognition forwarding finished");
}

#[async_trait]
impl RecognitionPort for RecognitionAdapter {
    async fn check_permission(&self) -> Result<(), RecognitionErrorKind> {
        self.recognizer
            .check_permission()
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self, sink), fields(session = sink.session()))]
    async fn start(&self, sink: RecognitionSink) -> Result<(), RecognitionErrorKind> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.recognizer.start(tx).await.map_err(Self::map_error)?;
        tokio::spawn(forward(rx, sink));
        Ok(())
    }

    #[instrument(skip(self))]
    async fn stop(&self) {
        self.recognizer.stop().await;
    }
}
