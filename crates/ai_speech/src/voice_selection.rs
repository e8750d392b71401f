//! Voice selection - Pick a voice by language and name hints
//!
//! Each voice gets a score: 4 for every hint found in its name, 2 for an
//! exact language match or 1 when only the primary language subtag matches.
//! The highest score wins; a voice scoring zero is never chosen. Among equal
//! scores the voice listed first in the catalog is taken.

use serde::{Deserialize, Serialize};

use crate::types::VoiceInfo;

const HINT_WEIGHT: u32 = 4;
const EXACT_LANGUAGE_WEIGHT: u32 = 2;
const PRIMARY_LANGUAGE_WEIGHT: u32 = 1;

/// What the caller would like the voice to be
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoicePreference {
    /// Preferred BCP-47 language tag
    pub language: String,
    /// Case-insensitive fragments looked for in voice names
    pub hints: Vec<String>,
}

impl VoicePreference {
    /// Create a preference for a language with name hints
    pub fn new(
        language: impl Into<String>,
        hints: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            language: language.into(),
            hints: hints.into_iter().map(Into::into).collect(),
        }
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().replace('_', "-").to_ascii_lowercase()
}

fn primary_subtag(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}

/// Score a single voice against a preference
pub fn score_voice(voice: &VoiceInfo, preference: &VoicePreference) -> u32 {
    let name = voice.name.to_lowercase();
    let hint_matches = preference
        .hints
        .iter()
        .map(|hint| hint.trim().to_lowercase())
        .filter(|hint| !hint.is_empty() && name.contains(hint.as_str()))
        .count();
    let hint_score = u32::try_from(hint_matches).unwrap_or(u32::MAX / HINT_WEIGHT) * HINT_WEIGHT;

    let wanted = normalize_tag(&preference.language);
    let offered = normalize_tag(&voice.language);
    let language_score = if wanted.is_empty() || offered.is_empty() {
        0
    } else if wanted == offered {
        EXACT_LANGUAGE_WEIGHT
    } else if primary_subtag(&wanted) == primary_subtag(&offered) {
        PRIMARY_LANGUAGE_WEIGHT
    } else {
        0
    };

    hint_score + language_score
}

/// Choose the best voice for `preference`, or `None` if nothing fits
pub fn select_voice<'a>(
    voices: &'a [VoiceInfo],
    preference: &VoicePreference,
) -> Option<&'a VoiceInfo> {
    let mut best: Option<(&VoiceInfo, u32)> = None;
    for voice in voices {
        let score = score_voice(voice, preference);
        if score > best.map_or(0, |(_, top)| top) {
            best = Some((voice, score));
        }
    }
    best.map(|(voice, _)| voice)
}
