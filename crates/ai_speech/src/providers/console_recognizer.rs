//! Console recognizer - Typed lines stand in for the microphone
//!
//! Each line is streamed back word by word as growing partial transcripts,
//! the way a live recognizer revises its hypothesis, with the full line sent
//! last as a final result. Lines typed while no session runs are dropped, as
//! speech would be with the microphone off.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tracing::{debug, instrument, trace, warn};

use crate::{error::SpeechError, ports::ContinuousRecognizer, types::RecognitionUpdate};

/// Recognizer fed by lines of text
pub struct ConsoleRecognizer {
    word_interval: Duration,
    inner: Mutex<Inner>,
}

struct Inner {
    lines: Option<mpsc::UnboundedReceiver<String>>,
    active: Option<ActiveSession>,
}

struct ActiveSession {
    updates: mpsc::UnboundedSender<RecognitionUpdate>,
    stop: oneshot::Sender<()>,
    task: JoinHandle<mpsc::UnboundedReceiver<String>>,
}

impl fmt::Debug for ConsoleRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleRecognizer")
            .field("word_interval", &self.word_interval)
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

impl ConsoleRecognizer {
    /// Create a recognizer reading lines from `lines`
    pub fn new(lines: mpsc::UnboundedReceiver<String>, word_interval: Duration) -> Self {
        Self {
            word_interval,
            inner: Mutex::new(Inner {
                lines: Some(lines),
                active: None,
            }),
        }
    }

    /// Create a recognizer together with the sender that feeds it
    pub fn channel(word_interval: Duration) -> (Self, mpsc::UnboundedSender<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(rx, word_interval), tx)
    }

    /// Whether a recognition session is running
    pub fn is_active(&self) -> bool {
        self.inner
            .lock()
            .active
            .as_ref()
            .is_some_and(|session| !session.task.is_finished())
    }

    async fn reclaim(&self, task: JoinHandle<mpsc::UnboundedReceiver<String>>) {
        match task.await {
            Ok(lines) => self.inner.lock().lines = Some(lines),
            Err(e) => warn!(error = %e, "Console recognition task failed"),
        }
    }
}

#[async_trait]
impl ContinuousRecognizer for ConsoleRecognizer {
    #[instrument(skip(self, updates))]
    async fn start(
        &self,
        updates: mpsc::UnboundedSender<RecognitionUpdate>,
    ) -> Result<(), SpeechError> {
        let finished = {
            let mut inner = self.inner.lock();
            let finished = inner
                .active
                .as_ref()
                .map(|session| session.task.is_finished());
            match finished {
                Some(true) => inner.active.take(),
                Some(false) => return Err(SpeechError::AlreadyActive),
                None => None,
            }
        };
        if let Some(session) = finished {
            self.reclaim(session.task).await;
        }

        let mut inner = self.inner.lock();
        if inner.active.is_some() {
            return Err(SpeechError::AlreadyActive);
        }
        let Some(mut lines) = inner.lines.take() else {
            return Err(SpeechError::Unsupported("console input is gone".to_string()));
        };

        let mut discarded = 0usize;
        while lines.try_recv().is_ok() {
            discarded += 1;
        }
        if discarded > 0 {
            debug!(discarded, "Dropped lines typed while not listening");
        }
        if lines.is_closed() {
            inner.lines = Some(lines);
            return Err(SpeechError::NoSpeech);
        }

        let (stop, stop_rx) = oneshot::channel();
        let task = tokio::spawn(stream_session(
            lines,
            updates.clone(),
            self.word_interval,
            stop_rx,
        ));
        inner.active = Some(ActiveSession {
            updates,
            stop,
            task,
        });
        debug!("Console recognition started");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn stop(&self) {
        let session = self.inner.lock().active.take();
        let Some(session) = session else {
            return;
        };

        let _ = session.stop.send(());
        let updates = session.updates.clone();
        self.reclaim(session.task).await;
        let _ = updates.send(RecognitionUpdate::Ended);
        debug!("Console recognition stopped");
    }
}

async fn stream_session(
    mut lines: mpsc::UnboundedReceiver<String>,
    updates: mpsc::UnboundedSender<RecognitionUpdate>,
    word_interval: Duration,
    mut stop: oneshot::Receiver<()>,
) -> mpsc::UnboundedReceiver<String> {
    let mut heard = String::new();

    loop {
        tokio::select! {
            biased;

            _ = &mut stop => break,
            line = lines.recv() => {
                let Some(line) = line else {
                    debug!("Console input closed, ending recognition session");
                    let _ = updates.send(RecognitionUpdate::Ended);
                    break;
                };
                tokio::select! {
                    biased;

                    _ = &mut stop => break,
                    () = stream_line(&updates, &mut heard, &line, word_interval) => {},
                }
            },
        }
    }

    lines
}

/// Send the growing transcript of one line, one word at a time
async fn stream_line(
    updates: &mpsc::UnboundedSender<RecognitionUpdate>,
    heard: &mut String,
    line: &str,
    word_interval: Duration,
) {
    let words: Vec<&str> = line.split_whitespace().collect();
    for (index, word) in words.iter().enumerate() {
        if !heard.is_empty() {
            heard.push(' ');
        }
        heard.push_str(word);

        let is_final = index + 1 == words.len();
        trace!(words = index + 1, is_final, "Streaming console transcript");
        let update = RecognitionUpdate::Transcript {
            text: heard.clone(),
            is_final,
        };
        if updates.send(update).is_err() {
            return;
        }
        if !is_final {
            tokio::time::sleep(word_interval).await;
        }
    }
}
