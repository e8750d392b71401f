//! Domain entities - Objects with identity and lifecycle

mod conversation_log;
mod conversation_turn;
mod working_transcript;

pub use conversation_log::ConversationLog;
pub use conversation_turn::{ConversationTurn, TurnRole};
pub use working_transcript::WorkingTranscript;
