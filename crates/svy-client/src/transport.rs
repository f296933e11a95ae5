//! The seam between [`SurveyClient`](crate::SurveyClient) and the network.
//!
//! [`HttpTransport`] talks to the real platform with reqwest;
//! [`MockTransport`](crate::mock::MockTransport) replays scripted responses.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use svy_config::ApiConfig;

use crate::error::ClientError;
use crate::http::parse_retry_after;

/// HTTP verbs the platform API needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
        }
    }
}

/// A request relative to the API root.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path (and query) joined onto the base URL, e.g. `studies/abc/`.
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    #[must_use]
    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// A fully-read response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
    /// Parsed `Retry-After` header, in seconds.
    pub retry_after: Option<u64>,
}

impl ApiResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Parse`] naming `what` if decoding fails.
    pub fn json<T: DeserializeOwned>(&self, what: &str) -> Result<T, ClientError> {
        serde_json::from_str(&self.body)
            .map_err(|e| ClientError::Parse(format!("{what}: {e}")))
    }
}

/// Executes API requests. Implementations must not retry.
pub trait Transport: Send + Sync {
    /// Send one request and read the whole response.
    ///
    /// Non-success statuses are returned as responses, not errors; only
    /// network-level failures are `Err`.
    fn execute(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;
}

/// reqwest-backed transport carrying the platform credential.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: reqwest::Url,
    authorization: String,
}

impl HttpTransport {
    /// Build a transport from API settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Auth`] if no token is configured,
    /// [`ClientError::Validation`] for an unparseable base URL, and
    /// [`ClientError::Transport`] if the reqwest client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        if !config.is_configured() {
            return Err(ClientError::Auth("no API token configured".to_string()));
        }

        // Url::join drops the last segment unless the base ends in '/'.
        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = reqwest::Url::parse(&base)
            .map_err(|e| ClientError::Validation(format!("invalid base URL '{base}': {e}")))?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("svy/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            authorization: config.authorization(),
        })
    }

    fn url_for(&self, path: &str) -> Result<reqwest::Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::Validation(format!("invalid request path '{path}': {e}")))
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = self.url_for(&request.path)?;
        let mut builder = self
            .http
            .request(request.method.into(), url)
            .header(reqwest::header::AUTHORIZATION, &self.authorization);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let retry_after = parse_retry_after(&resp);
        let body = resp.text().await?;
        Ok(ApiResponse {
            status,
            body,
            retry_after,
        })
    }
}
