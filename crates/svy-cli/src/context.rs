use std::path::PathBuf;

use anyhow::Context;
use svy_client::{PollOptions, SurveyClient};
use svy_config::SvyConfig;

use crate::cli::{GlobalFlags, WaitArgs};
use crate::state::{self, StudyState};

/// Loaded configuration plus where the study state lives.
pub struct AppContext {
    pub config: SvyConfig,
    pub state_path: PathBuf,
}

impl AppContext {
    pub fn new(config: SvyConfig, flags: &GlobalFlags) -> Self {
        let state_path = flags
            .state
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.general.state_file));
        Self { config, state_path }
    }

    /// HTTP client for the configured platform; fails if no token is set.
    pub fn client(&self) -> anyhow::Result<SurveyClient> {
        let api = self.config.require_api()?;
        SurveyClient::from_config(api).context("failed to build API client")
    }

    pub fn poll_options(&self, args: &WaitArgs) -> PollOptions {
        let mut options = PollOptions::from(&self.config.poll);
        if let Some(secs) = args.interval {
            options = PollOptions::new(std::time::Duration::from_secs(secs), options.max_wait);
        }
        if let Some(secs) = args.max_wait {
            options.max_wait = std::time::Duration::from_secs(secs);
        }
        options
    }

    pub fn load_state(&self) -> anyhow::Result<StudyState> {
        state::load(&self.state_path)
    }

    pub fn save_state(&self, state: &StudyState) -> anyhow::Result<()> {
        state::save(&self.state_path, state)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::Duration;

    use super::*;
    use crate::cli::OutputFormat;

    fn flags(state: Option<&str>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            quiet: false,
            state: state.map(PathBuf::from),
            config: None,
        }
    }

    #[test]
    fn state_path_defaults_to_config() {
        let ctx = AppContext::new(SvyConfig::default(), &flags(None));
        assert_eq!(ctx.state_path, Path::new(".svy/study.json"));
        let ctx = AppContext::new(SvyConfig::default(), &flags(Some("elsewhere.json")));
        assert_eq!(ctx.state_path, Path::new("elsewhere.json"));
    }

    #[test]
    fn wait_flags_override_config() {
        let ctx = AppContext::new(SvyConfig::default(), &flags(None));
        let options = ctx.poll_options(&WaitArgs {
            interval: Some(5),
            max_wait: None,
        });
        assert_eq!(options.interval, Duration::from_secs(5));
        assert_eq!(options.max_wait, Duration::from_secs(3600));
    }

    #[test]
    fn zero_interval_flag_is_clamped() {
        let ctx = AppContext::new(SvyConfig::default(), &flags(None));
        let options = ctx.poll_options(&WaitArgs {
            interval: Some(0),
            max_wait: Some(90),
        });
        assert_eq!(options.interval, Duration::from_secs(1));
        assert_eq!(options.max_wait, Duration::from_secs(90));
    }

    #[test]
    fn client_requires_token() {
        let ctx = AppContext::new(SvyConfig::default(), &flags(None));
        assert!(ctx.client().is_err());
    }
}
