use figment::Jail;
use svy_config::SvyConfig;

#[test]
fn platform_variables_fill_api_section() {
    Jail::expect_with(|jail| {
        jail.set_env("PROLIFIC_API_TOKEN", "tok-platform");
        jail.set_env("PROLIFIC_WORKSPACE_ID", "ws-1");
        jail.set_env("PROLIFIC_PROJECT_ID", "proj-1");

        let config = SvyConfig::load().expect("config loads");
        assert_eq!(config.api.token, "tok-platform");
        assert_eq!(config.api.workspace_id, "ws-1");
        assert_eq!(config.api.project_id, "proj-1");
        assert!(config.api.is_configured());
        Ok(())
    });
}

#[test]
fn prefixed_variables_beat_platform_variables() {
    Jail::expect_with(|jail| {
        jail.set_env("PROLIFIC_API_TOKEN", "tok-platform");
        jail.set_env("SVY_API__TOKEN", "tok-prefixed");

        let config = SvyConfig::load().expect("config loads");
        assert_eq!(config.api.token, "tok-prefixed");
        Ok(())
    });
}

#[test]
fn invalid_env_value_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("SVY_POLL__INTERVAL_SECS", "0");
        assert!(SvyConfig::load().is_err());
        Ok(())
    });
}
