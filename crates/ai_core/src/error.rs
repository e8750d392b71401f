//! Interviewer errors

use thiserror::Error;

/// Errors that can occur while producing an interviewer reply
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Failed to connect to the interviewer backend
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the interviewer backend failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The backend did not answer in time
    #[error("Request timed out")]
    Timeout,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Backend returned an error status
    #[error("Server error: {0}")]
    ServerError(String),

    /// The engine cannot run with the given settings
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
