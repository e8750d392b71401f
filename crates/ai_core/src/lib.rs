//! AI Core - Interviewer text generation
//!
//! Provides the engines that produce the interviewer's next line: a remote
//! interviewer reached over HTTP, which owns prompting and model choice, and
//! an offline scripted interviewer for running without a backend.

pub mod config;
pub mod error;
pub mod ports;
pub mod remote;
pub mod scripted;

use std::sync::Arc;

use tracing::info;

pub use config::{InterviewerBackend, InterviewerConfig};
pub use error::InferenceError;
pub use ports::{InterviewerEngine, ReplyRequest};
pub use remote::RemoteInterviewer;
pub use scripted::ScriptedInterviewer;

/// Build the engine selected by the configuration
pub fn build_interviewer(
    config: &InterviewerConfig,
) -> Result<Arc<dyn InterviewerEngine>, InferenceError> {
    let engine: Arc<dyn InterviewerEngine> = match config.resolved_backend() {
        InterviewerBackend::Remote => Arc::new(RemoteInterviewer::from_config(config)?),
        InterviewerBackend::Scripted => {
            Arc::new(ScriptedInterviewer::new(config.scripted_questions.clone())?)
        },
    };
    info!(engine = engine.name(), "Interviewer engine ready");
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_base_url_falls_back_to_scripted() {
        let config = InterviewerConfig::default();
        let engine = build_interviewer(&config).unwrap();
        assert_eq!(engine.name(), "scripted");
    }

    #[test]
    fn remote_backend_with_url_builds_remote() {
        let config = InterviewerConfig {
            base_url: Some("http://localhost:9000".to_string()),
            ..Default::default()
        };
        let engine = build_interviewer(&config).unwrap();
        assert_eq!(engine.name(), "remote");
    }

    #[test]
    fn scripted_without_questions_is_rejected() {
        let config = InterviewerConfig {
            backend: InterviewerBackend::Scripted,
            scripted_questions: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(
            build_interviewer(&config),
            Err(InferenceError::Configuration(_))
        ));
    }
}
