//! Scripted interviewer - Offline follow-up questions

use async_trait::async_trait;
use domain::TurnRole;
use tracing::debug;

use crate::{
    error::InferenceError,
    ports::{InterviewerEngine, ReplyRequest},
};

/// Interviewer that walks through a fixed list of questions
///
/// The position is derived from the history: every interviewer turn after the
/// greeting has used up one question. After the last question the list starts
/// over.
#[derive(Debug, Clone)]
pub struct ScriptedInterviewer {
    questions: Vec<String>,
}

impl ScriptedInterviewer {
    /// Create an interviewer asking `questions` in order
    pub fn new(questions: Vec<String>) -> Result<Self, InferenceError> {
        let questions: Vec<String> = questions
            .into_iter()
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .collect();

        if questions.is_empty() {
            return Err(InferenceError::Configuration(
                "scripted interviewer needs at least one question".to_string(),
            ));
        }
        Ok(Self { questions })
    }

    /// Number of questions in the script
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the script is empty (never true for a constructed interviewer)
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[async_trait]
impl InterviewerEngine for ScriptedInterviewer {
    async fn reply(&self, request: &ReplyRequest) -> Result<String, InferenceError> {
        let asked = request
            .history
            .iter()
            .filter(|turn| turn.role() == TurnRole::Ai)
            .count()
            .saturating_sub(1);
        let index = asked % self.questions.len();

        debug!(index, asked, "Scripted interviewer picked question");
        Ok(self.questions[index].clone())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::ConversationTurn;

    fn history(exchanges: usize) -> Vec<ConversationTurn> {
        let mut turns = vec![ConversationTurn::ai("Tell me about yourself.").unwrap()];
        for i in 0..exchanges {
            turns.push(ConversationTurn::user(format!("answer {i}")).unwrap());
            turns.push(ConversationTurn::ai(format!("question {i}")).unwrap());
        }
        turns
    }

    fn interviewer() -> ScriptedInterviewer {
        ScriptedInterviewer::new(vec!["First?".into(), "Second?".into()]).unwrap()
    }

    #[test]
    fn blank_questions_are_dropped() {
        let engine = ScriptedInterviewer::new(vec!["  ".into(), "Why?".into()]).unwrap();
        assert_eq!(engine.len(), 1);
        assert!(!engine.is_empty());
    }

    #[test]
    fn asks_in_order_and_wraps() {
        let engine = interviewer();
        let ask = |exchanges| {
            let request = ReplyRequest::new("s", "answer").with_history(history(exchanges));
            tokio_test::block_on(engine.reply(&request)).unwrap()
        };

        assert_eq!(ask(0), "First?");
        assert_eq!(ask(1), "Second?");
        assert_eq!(ask(2), "First?");
    }

    #[test]
    fn empty_history_starts_at_first_question() {
        let engine = interviewer();
        let request = ReplyRequest::new("s", "hello");
        let reply = tokio_test::block_on(engine.reply(&request)).unwrap();
        assert_eq!(reply, "First?");
    }
}
