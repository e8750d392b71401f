//! Session bootstrap port - Interface for obtaining the session token

use async_trait::async_trait;
use domain::SessionToken;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the collaborator that prepares an interview session
///
/// The returned token is opaque and is only passed through to the
/// interviewer.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionBootstrapPort: Send + Sync {
    /// Open a session and return its token
    async fn open_session(&self) -> Result<SessionToken, ApplicationError>;
}
