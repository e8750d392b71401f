//! Turn controller configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Quiet interval that closes a candidate turn, in milliseconds
pub const DEFAULT_SILENCE_TIMEOUT_MS: u64 = 2000;

/// Settle delay between the end of playback and re-arming the microphone
pub const DEFAULT_REARM_DELAY_MS: u64 = 500;

/// Opening line spoken when the interview starts
pub const DEFAULT_GREETING: &str =
    "Great! I've analyzed your resume. Let's begin the interview. Tell me about yourself.";

/// Line spoken when the interviewer could not produce a reply
pub const DEFAULT_FALLBACK_REPLY: &str =
    "I apologize, but I encountered an error. Could you repeat that?";

/// Timings and fixed lines of the turn controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnControllerConfig {
    /// Silence that ends the candidate's turn (ms)
    #[serde(default = "default_silence_timeout_ms")]
    pub silence_timeout_ms: u64,

    /// Delay before listening resumes after playback (ms)
    #[serde(default = "default_rearm_delay_ms")]
    pub rearm_delay_ms: u64,

    /// Opening line
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Apology spoken when no reply could be generated
    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,
}

const fn default_silence_timeout_ms() -> u64 {
    DEFAULT_SILENCE_TIMEOUT_MS
}

const fn default_rearm_delay_ms() -> u64 {
    DEFAULT_REARM_DELAY_MS
}

fn default_greeting() -> String {
    DEFAULT_GREETING.to_string()
}

fn default_fallback_reply() -> String {
    DEFAULT_FALLBACK_REPLY.to_string()
}

impl Default for TurnControllerConfig {
    fn default() -> Self {
        Self {
            silence_timeout_ms: default_silence_timeout_ms(),
            rearm_delay_ms: default_rearm_delay_ms(),
            greeting: default_greeting(),
            fallback_reply: default_fallback_reply(),
        }
    }
}

impl TurnControllerConfig {
    /// Silence timeout as a [`Duration`]
    pub const fn silence_timeout(&self) -> Duration {
        Duration::from_millis(self.silence_timeout_ms)
    }

    /// Re-arm delay as a [`Duration`]
    pub const fn rearm_delay(&self) -> Duration {
        Duration::from_millis(self.rearm_delay_ms)
    }

    /// Reject settings the controller cannot run with
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.silence_timeout_ms == 0 {
            return Err(ApplicationError::Configuration(
                "silence_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.greeting.trim().is_empty() {
            return Err(ApplicationError::Configuration(
                "greeting must not be empty".to_string(),
            ));
        }
        if self.fallback_reply.trim().is_empty() {
            return Err(ApplicationError::Configuration(
                "fallback_reply must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_timings() {
        let config = TurnControllerConfig::default();
        assert_eq!(config.silence_timeout(), Duration::from_millis(2000));
        assert_eq!(config.rearm_delay(), Duration::from_millis(500));
        assert!(config.greeting.starts_with("Great!"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_silence_timeout_is_rejected() {
        let config = TurnControllerConfig {
            silence_timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ApplicationError::Configuration(_))
        ));
    }

    #[test]
    fn blank_fallback_is_rejected() {
        let config = TurnControllerConfig {
            fallback_reply: "   ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
