//! Configuration for the interviewer engine

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Which engine produces the interviewer's replies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewerBackend {
    /// HTTP interviewer service
    #[default]
    Remote,
    /// Offline list of follow-up questions
    Scripted,
}

/// Configuration for the interviewer engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewerConfig {
    /// Engine to use
    #[serde(default)]
    pub backend: InterviewerBackend,

    /// Base URL of the interviewer service (the `/ask` endpoint lives below it)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Questions asked in order by the scripted interviewer
    #[serde(default = "default_scripted_questions")]
    pub scripted_questions: Vec<String>,
}

const fn default_timeout_ms() -> u64 {
    30_000
}

fn default_scripted_questions() -> Vec<String> {
    [
        "Thanks. Can you walk me through a project you are proud of?",
        "What was the hardest problem in that project, and how did you solve it?",
        "Tell me about a time you disagreed with a teammate. How did you handle it?",
        "What would you like to get better at in your next role?",
        "That's all from my side. Do you have any questions for me?",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

impl Default for InterviewerConfig {
    fn default() -> Self {
        Self {
            backend: InterviewerBackend::default(),
            base_url: None,
            timeout_ms: default_timeout_ms(),
            scripted_questions: default_scripted_questions(),
        }
    }
}

impl InterviewerConfig {
    /// Backend that will actually be used
    ///
    /// A remote backend without a base URL falls back to the scripted one.
    pub fn resolved_backend(&self) -> InterviewerBackend {
        match (self.backend, self.base_url.as_deref()) {
            (InterviewerBackend::Remote, None | Some("")) => {
                warn!("No interviewer base_url configured, using scripted interviewer");
                InterviewerBackend::Scripted
            },
            (backend, _) => backend,
        }
    }
}
