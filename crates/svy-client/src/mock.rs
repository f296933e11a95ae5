//! Scripted transport for tests.
//!
//! Responses are served in the order they were queued; every request is
//! recorded so tests can assert on paths and bodies.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::ClientError;
use crate::transport::{ApiRequest, ApiResponse, Transport};

#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, ClientError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON response.
    #[must_use]
    pub fn with_json(self, status: u16, body: &serde_json::Value) -> Self {
        self.with_text(status, &body.to_string())
    }

    /// Queue a response with a raw body.
    #[must_use]
    pub fn with_text(self, status: u16, body: &str) -> Self {
        self.push(Ok(ApiResponse {
            status,
            body: body.to_string(),
            retry_after: None,
        }));
        self
    }

    /// Queue a 429 carrying `Retry-After`.
    #[must_use]
    pub fn with_rate_limit(self, retry_after_secs: u64) -> Self {
        self.push(Ok(ApiResponse {
            status: 429,
            body: String::new(),
            retry_after: Some(retry_after_secs),
        }));
        self
    }

    /// Queue a network-level failure.
    #[must_use]
    pub fn with_error(self, error: ClientError) -> Self {
        self.push(Err(error));
        self
    }

    /// Requests seen so far, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the request log mutex is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().expect("request log poisoned").clone()
    }

    /// Responses not yet consumed.
    ///
    /// # Panics
    ///
    /// Panics if the response queue mutex is poisoned.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.responses.lock().expect("response queue poisoned").len()
    }

    fn push(&self, response: Result<ApiResponse, ClientError>) {
        self.responses
            .lock()
            .expect("response queue poisoned")
            .push_back(response);
    }
}

impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let label = format!("{} {}", request.method.as_str(), request.path);
        self.requests
            .lock()
            .map_err(|_| ClientError::Transport("request log poisoned".into()))?
            .push(request);
        self.responses
            .lock()
            .map_err(|_| ClientError::Transport("response queue poisoned".into()))?
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Transport(format!("no scripted response for {label}"))))
    }
}
