//! # svy-config
//!
//! Layered configuration loading for Surveyor using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SVY_*` prefix, `__` as separator)
//! 2. Platform variables `PROLIFIC_API_TOKEN`, `PROLIFIC_WORKSPACE_ID`,
//!    `PROLIFIC_PROJECT_ID`
//! 3. Project-level `svy.toml`
//! 4. User-level `~/.config/svy/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SVY_API__TOKEN` -> `api.token`, `SVY_POLL__INTERVAL_SECS` ->
//! `poll.interval_secs`, etc. The `__` (double underscore) separates nested
//! config sections.
//!
//! Study definitions are separate documents, loaded with
//! [`load_study_definition`].
//!
//! # Usage
//!
//! ```no_run
//! use svy_config::SvyConfig;
//!
//! let config = SvyConfig::load_with_dotenv(None).expect("config");
//! if config.api.is_configured() {
//!     println!("API root: {}", config.api.base_url);
//! }
//! ```

mod api;
mod error;
mod general;
mod poll;
mod report;
mod study;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use poll::PollConfig;
pub use report::ReportConfig;
pub use study::load_study_definition;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Platform variable → config key.
const PLATFORM_ENV: [(&str, &str); 3] = [
    ("PROLIFIC_API_TOKEN", "api.token"),
    ("PROLIFIC_WORKSPACE_ID", "api.workspace_id"),
    ("PROLIFIC_PROJECT_ID", "api.project_id"),
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SvyConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl SvyConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is
    /// out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, layering an explicit TOML file above `svy.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if `extra` does not exist, otherwise
    /// as [`Self::load`].
    pub fn load_from(extra: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = extra
            && !path.exists()
        {
            return Err(ConfigError::Missing {
                path: path.to_path_buf(),
            });
        }
        let config: Self = Self::figment(extra).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` on the current directory's `.env` before building the
    /// figment, so its variables take part in the environment layers. This
    /// is the typical entry point for the CLI. An unreadable `.env` is
    /// logged and skipped.
    ///
    /// # Errors
    ///
    /// As [`Self::load_from`].
    pub fn load_with_dotenv(extra: Option<&Path>) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(error) if error.not_found() => {}
            Err(error) => tracing::warn!(%error, "failed to read .env file"),
        }
        Self::load_from(extra)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment(extra: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from("svy.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit --config file
        if let Some(path) = extra {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Platform variables, then prefixed variables (highest priority)
        figment
            .merge(Self::platform_env())
            .merge(Env::prefixed("SVY_").split("__"))
    }

    /// Reject values that would make the workflow misbehave.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &str, reason: &str| ConfigError::InvalidValue {
            field: field.to_string(),
            reason: reason.to_string(),
        };

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(invalid("api.base_url", "must be an http(s) URL"));
        }
        if self.api.page_size == 0 {
            return Err(invalid("api.page_size", "must be at least 1"));
        }
        if self.api.timeout_secs == 0 {
            return Err(invalid("api.timeout_secs", "must be at least 1"));
        }
        if self.poll.interval_secs == 0 {
            return Err(invalid("poll.interval_secs", "must be at least 1"));
        }
        if self.poll.max_wait_secs < self.poll.interval_secs {
            return Err(invalid(
                "poll.max_wait_secs",
                "must not be shorter than poll.interval_secs",
            ));
        }
        if self.report.label_wrap < 8 {
            return Err(invalid("report.label_wrap", "must be at least 8"));
        }
        Ok(())
    }

    /// Fail with [`ConfigError::NotConfigured`] unless an API token is set.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn require_api(&self) -> Result<&ApiConfig, ConfigError> {
        if self.api.is_configured() {
            Ok(&self.api)
        } else {
            Err(ConfigError::NotConfigured {
                section: "api".to_string(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("svy").join("config.toml"))
    }

    fn platform_env() -> Env {
        Env::raw()
            .only(&PLATFORM_ENV.map(|(var, _)| var))
            .map(|key| {
                PLATFORM_ENV
                    .iter()
                    .find(|(var, _)| key.as_str().eq_ignore_ascii_case(var))
                    .map_or_else(|| key.into(), |(_, path)| (*path).into())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_but_unconfigured() {
        let config = SvyConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.api.is_configured());
        assert!(matches!(
            config.require_api(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }

    #[test]
    fn rejects_zero_interval() {
        let mut config = SvyConfig::default();
        config.poll.interval_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "poll.interval_secs"));
    }

    #[test]
    fn rejects_wait_shorter_than_interval() {
        let mut config = SvyConfig::default();
        config.poll.interval_secs = 60;
        config.poll.max_wait_secs = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut config = SvyConfig::default();
        config.api.base_url = "ftp://example.com".into();
        assert!(config.validate().is_err());
    }
}
