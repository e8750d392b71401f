//! Console speaker - Prints lines and takes the time to "say" them

use std::{
    fmt,
    io::Write,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, instrument};

use crate::{
    error::SpeechError,
    ports::SpeechOutput,
    types::{UtteranceSettings, VoiceInfo},
};

/// Speaking pace at rate 1.0
pub const WORDS_PER_MINUTE: f64 = 160.0;

/// Estimated time to speak `text` at `rate`
///
/// Non-positive or non-finite rates count as 1.0.
#[allow(clippy::cast_precision_loss)]
pub fn speaking_time(text: &str, rate: f32) -> Duration {
    let words = text.split_whitespace().count() as f64;
    let rate = if rate.is_finite() && rate > 0.0 {
        f64::from(rate)
    } else {
        1.0
    };
    Duration::from_secs_f64(words * 60.0 / (WORDS_PER_MINUTE * rate))
}

struct Playing {
    id: u64,
    cancel: oneshot::Sender<()>,
}

/// Speech output that writes each line to a console
pub struct ConsoleSpeaker {
    voices: Vec<VoiceInfo>,
    out: Mutex<Box<dyn Write + Send>>,
    playing: Mutex<Option<Playing>>,
    next_id: AtomicU64,
}

impl fmt::Debug for ConsoleSpeaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleSpeaker")
            .field("voices", &self.voices.len())
            .field("playing", &self.playing.lock().is_some())
            .finish_non_exhaustive()
    }
}

impl ConsoleSpeaker {
    /// Create a speaker writing to `out`
    pub fn new(voices: Vec<VoiceInfo>, out: impl Write + Send + 'static) -> Self {
        Self {
            voices,
            out: Mutex::new(Box::new(out)),
            playing: Mutex::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a speaker writing to standard output
    pub fn stdout(voices: Vec<VoiceInfo>) -> Self {
        Self::new(voices, std::io::stdout())
    }

    fn print(&self, text: &str, settings: &UtteranceSettings) -> Result<(), SpeechError> {
        let mut out = self.out.lock();
        writeln!(out, "[{}] {}", settings.voice_name(), text)?;
        out.flush()?;
        Ok(())
    }
}

#[async_trait]
impl SpeechOutput for ConsoleSpeaker {
    #[instrument(skip(self, text, settings), fields(voice = settings.voice_name()))]
    async fn speak(&self, text: &str, settings: &UtteranceSettings) -> Result<(), SpeechError> {
        self.print(text, settings)?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (cancel, cancelled) = oneshot::channel();
        let previous = self.playing.lock().replace(Playing { id, cancel });
        if let Some(previous) = previous {
            let _ = previous.cancel.send(());
        }

        let duration = speaking_time(text, settings.rate);
        debug!(?duration, "Speaking");

        let outcome = tokio::select! {
            () = tokio::time::sleep(duration) => Ok(()),
            _ = cancelled => Err(SpeechError::Cancelled),
        };

        let mut playing = self.playing.lock();
        if playing.as_ref().is_some_and(|current| current.id == id) {
            *playing = None;
        }
        outcome
    }

    async fn cancel(&self) {
        let playing = self.playing.lock().take();
        if let Some(playing) = playing {
            let _ = playing.cancel.send(());
            debug!(id = playing.id, "Speech cancelled");
        }
    }

    async fn voices(&self) -> Result<Vec<VoiceInfo>, SpeechError> {
        Ok(self.voices.clone())
    }
}
