//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_state_file() -> String {
    String::from(".svy/study.json")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Where the CLI keeps the created study between invocations.
    #[serde(default = "default_state_file")]
    pub state_file: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
        }
    }
}
