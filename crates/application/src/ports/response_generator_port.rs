//! Response generator port - Interface for the interviewer's text replies

use async_trait::async_trait;
use domain::{ConversationTurn, SessionToken};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Everything the interviewer needs to answer one candidate turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Session the interview runs under
    pub session: SessionToken,
    /// What the candidate just said
    pub utterance: String,
    /// Turns logged before the candidate's utterance, oldest first
    pub prior_turns: Vec<ConversationTurn>,
}

/// Port for generating the interviewer's reply
///
/// Called exactly once per Processing phase. Any failure is turned into the
/// fallback reply by the controller; implementations should not retry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResponseGeneratorPort: Send + Sync {
    /// Produce the reply text for a candidate utterance
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ApplicationError>;
}
