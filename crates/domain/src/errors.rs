//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A turn was created without any spoken or generated text
    #[error("Conversation turn must not be empty")]
    EmptyTurn,

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
