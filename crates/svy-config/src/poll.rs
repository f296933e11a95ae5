//! Status polling configuration.

use serde::{Deserialize, Serialize};

const fn default_interval_secs() -> u64 {
    30
}

const fn default_max_wait_secs() -> u64 {
    60 * 60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollConfig {
    /// Seconds between status checks.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Give up after this many seconds.
    #[serde(default = "default_max_wait_secs")]
    pub max_wait_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            max_wait_secs: default_max_wait_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = PollConfig::default();
        assert_eq!(config.interval_secs, 30);
        assert_eq!(config.max_wait_secs, 3600);
    }
}
