//! Types for recognition and speech output

use serde::{Deserialize, Serialize};

use crate::error::SpeechError;

/// Event produced by an active recognizer
#[derive(Debug)]
pub enum RecognitionUpdate {
    /// Full cumulative text heard in this session so far
    Transcript {
        /// Recognized text
        text: String,
        /// Whether the recognizer will not revise this text anymore
        is_final: bool,
    },
    /// The session is over, either on request or on its own
    Ended,
    /// The recognizer hit an error
    Failed(SpeechError),
}

/// A voice offered by a speech output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceInfo {
    /// Voice identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// BCP-47 language tag, e.g. `en-US`
    pub language: String,
    /// Voice gender (if known)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<VoiceGender>,
}

impl VoiceInfo {
    /// Create a new voice info
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            language: language.into(),
            gender: None,
        }
    }

    /// Set the gender
    #[must_use]
    pub const fn with_gender(mut self, gender: VoiceGender) -> Self {
        self.gender = Some(gender);
        self
    }
}

/// Voice gender classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceGender {
    /// Male voice
    Male,
    /// Female voice
    Female,
    /// Neutral/androgynous voice
    Neutral,
}

/// How a line should be spoken
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtteranceSettings {
    /// Voice to use; the output's default when `None`
    pub voice: Option<VoiceInfo>,
    /// Language tag of the text
    pub language: String,
    /// Speaking rate, 1.0 is normal
    pub rate: f32,
    /// Pitch, 1.0 is normal
    pub pitch: f32,
    /// Volume between 0.0 and 1.0
    pub volume: f32,
}

impl Default for UtteranceSettings {
    fn default() -> Self {
        Self {
            voice: None,
            language: "en-US".to_string(),
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

impl UtteranceSettings {
    /// Name of the chosen voice, for display
    pub fn voice_name(&self) -> &str {
        self.voice
            .as_ref()
            .map_or("default voice", |voice| voice.name.as_str())
    }
}
