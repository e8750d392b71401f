//! Port definitions for interviewer engines

use async_trait::async_trait;
use domain::ConversationTurn;

use crate::error::InferenceError;

/// One candidate turn the interviewer should answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRequest {
    /// Opaque session identifier from the session bootstrap
    pub session_id: String,
    /// What the candidate just said
    pub utterance: String,
    /// Conversation before the utterance, oldest first
    pub history: Vec<ConversationTurn>,
}

impl ReplyRequest {
    /// Create a request without history
    pub fn new(session_id: impl Into<String>, utterance: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            utterance: utterance.into(),
            history: Vec::new(),
        }
    }

    /// Attach the prior conversation
    #[must_use]
    pub fn with_history(mut self, history: Vec<ConversationTurn>) -> Self {
        self.history = history;
        self
    }
}

/// Port for interviewer engine implementations
#[async_trait]
pub trait InterviewerEngine: Send + Sync {
    /// Produce the interviewer's next line
    async fn reply(&self, request: &ReplyRequest) -> Result<String, InferenceError>;

    /// Short engine name for logs
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_keeps_history() {
        let greeting = ConversationTurn::ai("Tell me about yourself.").unwrap();
        let req = ReplyRequest::new("abc", "I build compilers").with_history(vec![greeting]);

        assert_eq!(req.session_id, "abc");
        assert_eq!(req.utterance, "I build compilers");
        assert_eq!(req.history.len(), 1);
    }
}
