//! # svy-client
//!
//! Survey platform HTTP client for Surveyor.
//!
//! Covers the four calls the workflow needs, plus the lookups they depend on:
//! - create a draft study (researcher lookup → survey → study)
//! - publish it
//! - read its status
//! - fetch submissions (paginated survey responses joined with the
//!   demographic export)
//!
//! [`wait_until_complete`] polls the status until the study finishes.
//!
//! All I/O goes through the [`Transport`] trait. [`HttpTransport`] is the
//! reqwest implementation; [`mock::MockTransport`] replays scripted
//! responses in tests. No call is retried internally.

pub mod mock;
pub mod payload;
pub mod poller;

mod error;
mod export;
mod http;
mod studies;
mod submissions;
mod transport;

pub use error::ClientError;
pub use poller::{MIN_POLL_INTERVAL, PollOptions, wait_until_complete};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};

use svy_config::ApiConfig;

use crate::http::check_response;

/// Client for the survey platform API.
pub struct SurveyClient<T = HttpTransport> {
    transport: T,
    project_id: String,
    workspace_id: String,
    page_size: u32,
}

impl SurveyClient<HttpTransport> {
    /// Build a client that talks to the configured platform.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the transport cannot be built (missing
    /// token, bad base URL).
    pub fn from_config(config: &ApiConfig) -> Result<Self, ClientError> {
        Ok(Self::with_transport(HttpTransport::new(config)?, config))
    }
}

impl<T: Transport> SurveyClient<T> {
    /// Build a client over any transport.
    #[must_use]
    pub fn with_transport(transport: T, config: &ApiConfig) -> Self {
        Self {
            transport,
            project_id: config.project_id.trim().to_string(),
            workspace_id: config.workspace_id.trim().to_string(),
            page_size: config.page_size.max(1),
        }
    }

    /// The underlying transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request and map error statuses.
    async fn call(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        tracing::debug!(method = request.method.as_str(), path = %request.path, "api request");
        let resp = self.transport.execute(request).await?;
        tracing::debug!(status = resp.status, bytes = resp.body.len(), "api response");
        check_response(resp)
    }
}

/// Percent-encode one path segment.
fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
