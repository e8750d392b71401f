//! Session bootstrap adapter - Provides the interview session token

use application::error::ApplicationError;
use application::ports::SessionBootstrapPort;
use async_trait::async_trait;
use domain::SessionToken;
use tracing::info;
use uuid::Uuid;

/// Session bootstrap without a remote collaborator
///
/// Hands out the configured token, typically the one the resume upload
/// produced, or a fresh UUID when none is given.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionBootstrap {
    token: Option<String>,
}

impl StaticSessionBootstrap {
    /// Create a bootstrap with an optional fixed token
    ///
    /// Blank tokens count as missing.
    pub fn new(token: Option<String>) -> Self {
        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        Self { token }
    }
}

#[async_trait]
impl SessionBootstrapPort for StaticSessionBootstrap {
    async fn open_session(&self) -> Result<SessionToken, ApplicationError> {
        let token = match &self.token {
            Some(token) => SessionToken::new(token.clone()),
            None => {
                let token = SessionToken::new(Uuid::new_v4().to_string());
                info!(session = %token, "Generated session token");
                token
            },
        };
        Ok(token)
    }
}
