//! Transcript accumulator - Folds recognition results into one utterance

use domain::WorkingTranscript;
use tracing::trace;

/// Keeps the working transcript of the current listening phase
///
/// Recognizers resend the whole utterance with every result, so the latest
/// update always replaces what came before. Concatenating would count the
/// same words again on every partial result.
#[derive(Debug, Default)]
pub struct TranscriptAccumulator {
    transcript: WorkingTranscript,
    updates: usize,
}

impl TranscriptAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Take in a recognition result
    pub fn apply(&mut self, text: impl Into<String>, is_final: bool) {
        self.transcript.replace(text, is_final);
        self.updates += 1;
        trace!(
            updates = self.updates,
            is_final,
            chars = self.transcript.text().len(),
            "Transcript updated"
        );
    }

    /// Start over for a new listening phase
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.updates = 0;
    }

    /// Current working transcript
    pub const fn transcript(&self) -> &WorkingTranscript {
        &self.transcript
    }

    /// Utterance ready for submission, `None` while nothing was said
    pub fn utterance(&self) -> Option<&str> {
        self.transcript.utterance()
    }

    /// Number of results received since the last reset
    pub const fn updates(&self) -> usize {
        self.updates
    }
}
