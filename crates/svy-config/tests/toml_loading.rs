//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::Jail;
use svy_config::{ConfigError, SvyConfig};

#[test]
fn loads_project_local_svy_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "svy.toml",
            r#"
[api]
token = "toml-token"
project_id = "toml-project"
page_size = 25

[poll]
interval_secs = 5
max_wait_secs = 600

[report]
output_dir = "out"
display_timezone = "Europe/London"
"#,
        )?;

        let config = SvyConfig::load().expect("config loads");
        assert_eq!(config.api.token, "toml-token");
        assert_eq!(config.api.project_id, "toml-project");
        assert_eq!(config.api.page_size, 25);
        assert_eq!(config.api.base_url, "https://api.prolific.com/api/v1/");
        assert_eq!(config.poll.interval_secs, 5);
        assert_eq!(config.poll.max_wait_secs, 600);
        assert_eq!(config.report.output_dir, "out");
        assert_eq!(config.report.display_timezone, "Europe/London");
        assert_eq!(config.report.csv_file, "submissions.csv");
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "svy.toml",
            r#"
[poll]
interval_secs = 5
max_wait_secs = 600
"#,
        )?;
        jail.set_env("SVY_POLL__INTERVAL_SECS", "15");

        let config = SvyConfig::load().expect("config loads");
        assert_eq!(config.poll.interval_secs, 15);
        assert_eq!(config.poll.max_wait_secs, 600);
        Ok(())
    });
}

#[test]
fn explicit_config_file_layers_above_project_file() {
    Jail::expect_with(|jail| {
        jail.create_file("svy.toml", "[api]\ntoken = \"project\"\n")?;
        jail.create_file("ci.toml", "[api]\ntoken = \"ci\"\n")?;

        let config = SvyConfig::load_from(Some("ci.toml".as_ref())).expect("config loads");
        assert_eq!(config.api.token, "ci");
        Ok(())
    });
}

#[test]
fn explicit_config_file_must_exist() {
    Jail::expect_with(|_jail| {
        let err = SvyConfig::load_from(Some("absent.toml".as_ref())).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { .. }));
        Ok(())
    });
}

#[test]
fn no_files_yields_defaults() {
    Jail::expect_with(|_jail| {
        let config = SvyConfig::load().expect("config loads");
        assert!(!config.api.is_configured());
        assert_eq!(config.poll.interval_secs, 30);
        assert_eq!(config.general.state_file, ".svy/study.json");
        Ok(())
    });
}
