//! Session state - The single source of truth for turn ownership

use std::fmt;

use serde::{Deserialize, Serialize};

/// Phase of an interview session
///
/// Exactly one value holds at any instant. Listening, Processing and Speaking
/// never overlap, which keeps the recognizer, the interviewer and the speech
/// player from being active at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Not started, or reset after a terminal state
    #[default]
    Idle,
    /// Playing the opening line
    Greeting,
    /// Capturing the candidate's answer
    Listening,
    /// Waiting for the interviewer's reply
    Processing,
    /// Playing the interviewer's reply
    Speaking,
    /// Stopped on request
    Ended,
    /// Stopped by a fatal failure; needs a reset
    Error,
}

impl SessionState {
    /// Whether the session is over and must ignore late completions
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended | Self::Error)
    }

    /// Whether audio is being produced by the interviewer
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        matches!(self, Self::Greeting | Self::Speaking)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Greeting => "greeting",
            Self::Listening => "listening",
            Self::Processing => "processing",
            Self::Speaking => "speaking",
            Self::Ended => "ended",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}
