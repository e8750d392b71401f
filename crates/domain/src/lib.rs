//! Domain layer for the interview turn-taking core
//!
//! Contains the conversation model, the session state machine vocabulary and
//! domain errors. This layer knows nothing about audio, networks or runtimes.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
