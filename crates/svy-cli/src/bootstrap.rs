use anyhow::Context;
use svy_config::SvyConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered config (plus `--config` if given).
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<SvyConfig> {
    SvyConfig::load_with_dotenv(flags.config.as_deref()).context("failed to load configuration")
}
