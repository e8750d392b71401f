//! Conversation turn entity - One utterance by either party

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// The candidate speaking into the microphone
    User,
    /// The automated interviewer
    Ai,
}

impl TurnRole {
    /// Label used when rendering a transcript for people
    #[must_use]
    pub const fn speaker_label(&self) -> &'static str {
        match self {
            Self::User => "Candidate",
            Self::Ai => "Interviewer",
        }
    }
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Ai => write!(f, "ai"),
        }
    }
}

/// A single, immutable entry of the interview dialogue
///
/// Fields are private so a turn cannot be edited once it has been logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    role: TurnRole,
    text: String,
    timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    /// Create a turn stamped with the current time
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyTurn` if `text` is blank.
    pub fn new(role: TurnRole, text: impl Into<String>) -> Result<Self, DomainError> {
        Self::at(role, text, Utc::now())
    }

    /// Create a turn with an explicit timestamp
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyTurn` if `text` is blank.
    pub fn at(
        role: TurnRole,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::EmptyTurn);
        }
        Ok(Self {
            role,
            text,
            timestamp,
        })
    }

    /// Create a candidate turn
    pub fn user(text: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(TurnRole::User, text)
    }

    /// Create an interviewer turn
    pub fn ai(text: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(TurnRole::Ai, text)
    }

    /// Who produced this turn
    pub const fn role(&self) -> TurnRole {
        self.role
    }

    /// What was said
    pub fn text(&self) -> &str {
        &self.text
    }

    /// When the turn was logged
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for ConversationTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role.speaker_label(), self.text)
    }
}
