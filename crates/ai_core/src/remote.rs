//! Remote interviewer - HTTP client for the interviewer service

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{
    config::InterviewerConfig,
    error::InferenceError,
    ports::{InterviewerEngine, ReplyRequest},
};

/// Interviewer backed by a remote `/ask` endpoint
///
/// The service keeps the resume context for the session and decides on
/// prompting and model; this client only forwards the candidate's words.
#[derive(Debug)]
pub struct RemoteInterviewer {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AskRequest<'a> {
    session_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct AskResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

impl AskResponse {
    /// `response` wins unless it is missing or empty
    fn into_reply(self) -> Option<String> {
        self.response
            .filter(|reply| !reply.is_empty())
            .or(self.text)
    }
}

impl RemoteInterviewer {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!(base_url = %base_url, timeout_ms, "Initialized remote interviewer");

        Ok(Self { client, base_url })
    }

    /// Create a client from the interviewer configuration
    pub fn from_config(config: &InterviewerConfig) -> Result<Self, InferenceError> {
        let base_url = config.base_url.as_deref().ok_or_else(|| {
            InferenceError::Configuration("interviewer base_url is not set".to_string())
        })?;
        Self::new(base_url, config.timeout_ms)
    }

    /// Build the URL for an endpoint below the base URL
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl InterviewerEngine for RemoteInterviewer {
    #[instrument(skip(self, request), fields(session = %request.session_id))]
    async fn reply(&self, request: &ReplyRequest) -> Result<String, InferenceError> {
        let body = AskRequest {
            session_id: &request.session_id,
            text: &request.utterance,
        };

        debug!(chars = request.utterance.len(), "Sending utterance to interviewer");

        let response = self
            .client
            .post(self.endpoint("ask"))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Interviewer rate limited the request");
            return Err(InferenceError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Interviewer request failed");
            return Err(InferenceError::ServerError(format!("Status {status}: {body}")));
        }

        let ask: AskResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let reply = ask.into_reply().ok_or_else(|| {
            InferenceError::InvalidResponse("reply has neither `response` nor `text`".to_string())
        })?;

        debug!(chars = reply.len(), "Interviewer replied");
        Ok(reply)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
