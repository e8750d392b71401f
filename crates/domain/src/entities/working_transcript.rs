//! Working transcript - The utterance currently being spoken

use serde::{Deserialize, Serialize};

/// Latest recognized text of the utterance in progress
///
/// Recognition results carry the full cumulative text of the utterance, so
/// each update replaces the previous one instead of being appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingTranscript {
    text: String,
    is_final: bool,
}

impl WorkingTranscript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the text with the latest recognition result
    pub fn replace(&mut self, text: impl Into<String>, is_final: bool) {
        self.text = text.into();
        self.is_final = is_final;
    }

    /// Forget the current utterance
    pub fn clear(&mut self) {
        self.text.clear();
        self.is_final = false;
    }

    /// Raw latest text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the latest result was marked final by the recognizer
    pub const fn is_final(&self) -> bool {
        self.is_final
    }

    /// Trimmed text ready to be submitted, `None` when nothing was said
    pub fn utterance(&self) -> Option<&str> {
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_overwrites_previous_text() {
        let mut transcript = WorkingTranscript::new();
        transcript.replace("Tell", false);
        transcript.replace("Tell me", false);
        transcript.replace("Tell me about yourself", true);

        assert_eq!(transcript.text(), "Tell me about yourself");
        assert!(transcript.is_final());
    }

    #[test]
    fn blank_text_has_no_utterance() {
        let mut transcript = WorkingTranscript::new();
        assert!(transcript.utterance().is_none());
        transcript.replace("   ", false);
        assert!(transcript.utterance().is_none());
    }

    #[test]
    fn utterance_is_trimmed() {
        let mut transcript = WorkingTranscript::new();
        transcript.replace("  I like Rust ", false);
        assert_eq!(transcript.utterance(), Some("I like Rust"));
    }

    #[test]
    fn clear_resets_final_flag() {
        let mut transcript = WorkingTranscript::new();
        transcript.replace("done", true);
        transcript.clear();
        assert_eq!(transcript.text(), "");
        assert!(!transcript.is_final());
    }
}
