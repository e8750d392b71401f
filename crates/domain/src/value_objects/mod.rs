//! Value objects - Immutable, identity-less domain values

mod session_state;
mod session_token;

pub use session_state::SessionState;
pub use session_token::SessionToken;
