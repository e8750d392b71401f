//! Configuration for speech capabilities

use serde::{Deserialize, Serialize};

use crate::types::{UtteranceSettings, VoiceGender, VoiceInfo};
use crate::voice_selection::VoicePreference;

/// Configuration for recognition and speech output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Language tag used for recognition and voice choice
    #[serde(default = "default_language")]
    pub language: String,

    /// Speaking rate, 1.0 is normal
    #[serde(default = "default_rate")]
    pub rate: f32,

    /// Pitch, 1.0 is normal
    #[serde(default = "default_pitch")]
    pub pitch: f32,

    /// Volume between 0.0 and 1.0
    #[serde(default = "default_volume")]
    pub volume: f32,

    /// Fragments looked for in voice names, most wanted first
    #[serde(default = "default_voice_hints")]
    pub voice_hints: Vec<String>,

    /// Pause between streamed words of the console recognizer (ms)
    #[serde(default = "default_word_interval_ms")]
    pub word_interval_ms: u64,

    /// Voice catalog of the console speaker
    #[serde(default = "default_voices")]
    pub voices: Vec<VoiceInfo>,
}

fn default_language() -> String {
    "en-US".to_string()
}

const fn default_rate() -> f32 {
    0.9
}

const fn default_pitch() -> f32 {
    1.1
}

const fn default_volume() -> f32 {
    1.0
}

fn default_voice_hints() -> Vec<String> {
    vec![
        "female".to_string(),
        "samantha".to_string(),
        "google uk english female".to_string(),
    ]
}

const fn default_word_interval_ms() -> u64 {
    120
}

fn default_voices() -> Vec<VoiceInfo> {
    vec![
        VoiceInfo::new("daniel", "Daniel", "en-GB").with_gender(VoiceGender::Male),
        VoiceInfo::new("samantha", "Samantha", "en-US").with_gender(VoiceGender::Female),
        VoiceInfo::new("google-uk-female", "Google UK English Female", "en-GB")
            .with_gender(VoiceGender::Female),
        VoiceInfo::new("google-us", "Google US English", "en-US"),
        VoiceInfo::new("anna", "Anna", "de-DE").with_gender(VoiceGender::Female),
    ]
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            rate: default_rate(),
            pitch: default_pitch(),
            volume: default_volume(),
            voice_hints: default_voice_hints(),
            word_interval_ms: default_word_interval_ms(),
            voices: default_voices(),
        }
    }
}

impl SpeechConfig {
    /// Preference handed to voice selection
    pub fn voice_preference(&self) -> VoicePreference {
        VoicePreference::new(self.language.clone(), self.voice_hints.iter().cloned())
    }

    /// Settings for speaking with `voice`
    pub fn utterance_settings(&self, voice: Option<VoiceInfo>) -> UtteranceSettings {
        UtteranceSettings {
            voice,
            language: self.language.clone(),
            rate: self.rate,
            pitch: self.pitch,
            volume: self.volume.clamp(0.0, 1.0),
        }
    }
}
