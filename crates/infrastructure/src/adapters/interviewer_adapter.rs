//! Interviewer adapter - Implements ResponseGeneratorPort using ai_core crate

use std::{fmt, sync::Arc};

use ai_core::{InferenceError, InterviewerEngine, ReplyRequest};
use application::error::ApplicationError;
use application::ports::{GenerationRequest, ResponseGeneratorPort};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Adapter for interviewer engines from the ai_core crate
pub struct InterviewerAdapter {
    engine: Arc<dyn InterviewerEngine>,
}

impl fmt::Debug for InterviewerAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterviewerAdapter")
            .field("engine", &self.engine.name())
            .finish()
    }
}

impl InterviewerAdapter {
    /// Create a new interviewer adapter
    pub fn new(engine: Arc<dyn InterviewerEngine>) -> Self {
        Self { engine }
    }

    /// Map inference error to application error
    fn map_error(err: InferenceError) -> ApplicationError {
        match err {
            InferenceError::Timeout => {
                ApplicationError::Generation("interviewer did not answer in time".to_string())
            },
            InferenceError::RateLimited => {
                ApplicationError::Generation("interviewer rate limit exceeded".to_string())
            },
            InferenceError::Configuration(e) => ApplicationError::Configuration(e),
            InferenceError::ConnectionFailed(e)
            | InferenceError::RequestFailed(e)
            | InferenceError::ServerError(e) => ApplicationError::Generation(e),
            InferenceError::InvalidResponse(e) => {
                ApplicationError::Generation(format!("invalid interviewer response: {e}"))
            },
        }
    }
}

#[async_trait]
impl ResponseGeneratorPort for InterviewerAdapter {
    #[instrument(
        skip(self, request),
        fields(engine = self.engine.name(), turns = request.prior_turns.len())
    )]
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ApplicationError> {
        let reply_request = ReplyRequest::new(request.session.as_str(), request.utterance.as_str())
            .with_history(request.prior_turns.clone());

        let reply = self
            .engine
            .reply(&reply_request)
            .await
            .map_err(Self::map_error)?;
        debug!(chars = reply.len(), "Interviewer replied");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use ai_core::{RemoteInterviewer, ScriptedInterviewer};
    use domain::{ConversationTurn, SessionToken};
    use mockall::mock;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    mock! {
        Engine {}

        #[async_trait]
        impl InterviewerEngine for Engine {
            async fn reply(&self, request: &ReplyRequest) -> Result<String, InferenceError>;
            fn name(&self) -> &'static str;
        }
    }

    fn request(utterance: &str, prior_turns: Vec<ConversationTurn>) -> GenerationRequest {
        GenerationRequest {
            session: SessionToken::new("session-1"),
            utterance: utterance.to_string(),
            prior_turns,
        }
    }

    #[tokio::test]
    async fn request_fields_are_passed_through() {
        let greeting = ConversationTurn::ai("Tell me about yourself.").unwrap();
        let mut engine = MockEngine::new();
        engine.expect_name().return_const("mock");
        engine
            .expect_reply()
            .withf(|req| {
                req.session_id == "session-1"
                    && req.utterance == "I build compilers"
                    && req.history.len() == 1
            })
            .times(1)
            .returning(|_| Ok("Which ones?".to_string()));

        let adapter = InterviewerAdapter::new(Arc::new(engine));
        let reply = adapter
            .generate(&request("I build compilers", vec![greeting]))
            .await
            .unwrap();
        assert_eq!(reply, "Which ones?");
    }

    #[tokio::test]
    async fn engine_failure_becomes_generation_error() {
        let mut engine = MockEngine::new();
        engine.expect_name().return_const("mock");
        engine
            .expect_reply()
            .returning(|_| Err(InferenceError::ServerError("Status 500: boom".into())));

        let adapter = InterviewerAdapter::new(Arc::new(engine));
        let err = adapter.generate(&request("hi", Vec::new())).await.unwrap_err();
        assert_eq!(err, ApplicationError::Generation("Status 500: boom".to_string()));
    }

    #[test]
    fn map_error_timeout() {
        let err = InterviewerAdapter::map_error(InferenceError::Timeout);
        assert!(matches!(err, ApplicationError::Generation(_)));
    }

    #[test]
    fn map_error_configuration() {
        let err = InterviewerAdapter::map_error(InferenceError::Configuration("x".into()));
        assert_eq!(err, ApplicationError::Configuration("x".to_string()));
    }

    #[tokio::test]
    async fn scripted_engine_answers_offline() {
        let engine = ScriptedInterviewer::new(vec!["First?".to_string(), "Second?".to_string()])
            .unwrap();
        let adapter = InterviewerAdapter::new(Arc::new(engine));

        let greeting = ConversationTurn::ai("Hello").unwrap();
        let reply = adapter
            .generate(&request("I like Rust", vec![greeting]))
            .await
            .unwrap();
        assert_eq!(reply, "First?");
    }

    #[tokio::test]
    async fn remote_engine_posts_session_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask"))
            .and(body_json(json!({ "sessionId": "session-1", "text": "I lead a team" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "response": "How big?" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let engine = RemoteInterviewer::new(server.uri(), 5_000).unwrap();
        let adapter = InterviewerAdapter::new(Arc::new(engine));

        let reply = adapter
            .generate(&request("I lead a team", Vec::new()))
            .await
            .unwrap();
        assert_eq!(reply, "How big?");
    }
}
