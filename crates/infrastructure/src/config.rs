//! Application configuration
//!
//! Settings come from an optional TOML file, overridden by environment
//! variables such as `INTERVIEW_INTERVIEW__SILENCE_TIMEOUT_MS` or
//! `INTERVIEW_INTERVIEWER__BASE_URL`. Every field has a default, so running
//! without any configuration works.

use std::path::Path;

use ai_core::InterviewerConfig;
use ai_speech::SpeechConfig;
use application::TurnControllerConfig;
use serde::{Deserialize, Serialize};

use crate::telemetry::LoggingConfig;

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "INTERVIEW";

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_NAME: &str = "interview";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Turn-taking timings and fixed lines
    #[serde(default)]
    pub interview: TurnControllerConfig,

    /// Interviewer engine selection
    #[serde(default)]
    pub interviewer: InterviewerConfig,

    /// Recognition and speech output
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// With `path`, that file must exist. Without it, `interview.toml` in
    /// the working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with(path, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with(
        path: Option<&Path>,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the controller cannot run with
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.interview
            .validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
