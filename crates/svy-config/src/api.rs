//! Survey platform API configuration.

use serde::{Deserialize, Serialize};

/// Default platform API root.
fn default_base_url() -> String {
    String::from("https://api.prolific.com/api/v1/")
}

fn default_auth_scheme() -> String {
    String::from("Token")
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_page_size() -> u32 {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// API root; every endpoint path is joined onto it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API token sent in the `Authorization` header.
    #[serde(default)]
    pub token: String,

    /// Scheme placed before the token (`Token` or `Bearer`).
    #[serde(default = "default_auth_scheme")]
    pub auth_scheme: String,

    /// Workspace that owns the project.
    #[serde(default)]
    pub workspace_id: String,

    /// Project new studies are filed under.
    #[serde(default)]
    pub project_id: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Page size for paginated listings.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            auth_scheme: default_auth_scheme(),
            workspace_id: String::new(),
            project_id: String::new(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
        }
    }
}

impl ApiConfig {
    /// Check if a token is present; every API call needs one.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// Value of the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("{} {}", self.auth_scheme, self.token.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = ApiConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.base_url, "https://api.prolific.com/api/v1/");
        assert_eq!(config.page_size, 100);
    }

    #[test]
    fn token_alone_is_enough() {
        let config = ApiConfig {
            token: "abc".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
        assert!(config.project_id.is_empty());
        assert_eq!(config.authorization(), "Token abc");
    }

    #[test]
    fn configured_with_project() {
        let config = ApiConfig {
            token: "abc".into(),
            auth_scheme: "Bearer".into(),
            project_id: "proj-1".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
        assert_eq!(config.authorization(), "Bearer abc");
    }
}
