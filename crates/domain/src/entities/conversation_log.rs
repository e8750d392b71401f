//! Conversation log - Ordered, append-only dialogue history

use serde::{Deserialize, Serialize};

use super::{ConversationTurn, TurnRole};

/// The dialogue of one interview session, oldest turn first
///
/// Order is the only source of truth for the context handed to the
/// interviewer. Turns are never reordered or edited; the log only shrinks
/// when the whole session is reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationLog {
    turns: Vec<ConversationTurn>,
}

impl ConversationLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn at the end of the dialogue
    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// All turns, oldest first
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// The most recent turn
    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    /// Number of turns of the given role
    pub fn count_by_role(&self, role: TurnRole) -> usize {
        self.turns.iter().filter(|t| t.role() == role).count()
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether nothing has been said yet
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Drop every turn. Only a session reset may call this.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
