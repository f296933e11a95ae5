//! Client error types.

use svy_core::{CoreError, StudyStatus};
use thiserror::Error;

/// Errors that can occur when talking to the survey platform.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing or rejected credential (HTTP 401/403).
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Malformed study definition or request body (local check or HTTP 400/422).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Invalid state transition, e.g. publishing twice (local check or HTTP 409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Network or HTTP-layer failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The platform returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Any other non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the platform.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse a platform response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The study did not reach a terminal status in time.
    #[error("study {study_id} still {last_status} after {waited_secs}s")]
    Timeout {
        study_id: String,
        waited_secs: u64,
        last_status: StudyStatus,
    },
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

impl From<CoreError> for ClientError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidTransition { .. } => Self::Conflict(error.to_string()),
            CoreError::InvalidDefinition(_) => Self::Validation(error.to_string()),
        }
    }
}
