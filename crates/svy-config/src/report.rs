//! Report output configuration.

use serde::{Deserialize, Serialize};

fn default_output_dir() -> String {
    String::from("svy-output")
}

fn default_csv_file() -> String {
    String::from("submissions.csv")
}

fn default_display_timezone() -> String {
    String::from("America/Los_Angeles")
}

const fn default_label_wrap() -> usize {
    32
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Directory receiving the CSV and chart files.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    #[serde(default = "default_csv_file")]
    pub csv_file: String,

    /// IANA zone used when printing timestamps.
    #[serde(default = "default_display_timezone")]
    pub display_timezone: String,

    /// Chart labels wrap after this many characters.
    #[serde(default = "default_label_wrap")]
    pub label_wrap: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            csv_file: default_csv_file(),
            display_timezone: default_display_timezone(),
            label_wrap: default_label_wrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ReportConfig::default();
        assert_eq!(config.output_dir, "svy-output");
        assert_eq!(config.csv_file, "submissions.csv");
        assert_eq!(config.display_timezone, "America/Los_Angeles");
        assert_eq!(config.label_wrap, 32);
    }
}
