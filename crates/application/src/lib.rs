//! Application layer - Turn-taking orchestration
//!
//! Contains the port definitions the interview core depends on and the
//! services that drive them: the transcript accumulator, the silence
//! endpointer and the turn controller state machine.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
