use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::submission::{ANSWER_SEPARATOR, RESERVED_FIELDS};
use crate::enums::QuestionKind;
use crate::errors::CoreError;

const DEVICES: [&str; 3] = ["desktop", "mobile", "tablet"];

const fn default_estimated_minutes() -> u32 {
    5
}

const fn default_max_minutes() -> u32 {
    20
}

fn default_devices() -> Vec<String> {
    DEVICES.iter().map(ToString::to_string).collect()
}

fn default_code_prefix() -> String {
    String::from("SVY")
}

/// Declarative definition of a study: what to ask, whom, and for how much.
///
/// Loaded once from a TOML or YAML file and read-only afterwards. Call
/// [`StudyConfig::validate`] before sending it anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyConfig {
    /// Public study name shown to participants.
    pub title: String,

    /// Prefix of the researcher-facing name; a timestamp is appended.
    /// Falls back to `title`.
    #[serde(default)]
    pub internal_name_prefix: Option<String>,

    pub description: String,

    /// Questions in the order participants see them.
    pub questions: Vec<Question>,

    /// Reward per participant in currency units (e.g. `1.25`).
    pub reward: f64,

    /// Number of participant places to open.
    pub participants: u32,

    #[serde(default = "default_estimated_minutes")]
    pub estimated_minutes: u32,

    #[serde(default = "default_max_minutes")]
    pub max_minutes: u32,

    #[serde(default = "default_devices")]
    pub device_compatibility: Vec<String>,

    #[serde(default)]
    pub privacy_notice: String,

    /// Participant eligibility filters, passed through to the platform.
    #[serde(default)]
    pub filters: Vec<EligibilityFilter>,

    #[serde(default = "default_code_prefix")]
    pub completion_code_prefix: String,
}

/// One survey question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable local identifier; becomes a column name and a chart file name
    /// in reports. ASCII letters, digits, `_` and `-` only.
    pub id: String,
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<String>,
}

/// A platform eligibility filter such as `age` or `sex`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityFilter {
    pub filter_id: String,
    #[serde(flatten)]
    pub selection: FilterSelection,
}

/// Either a set of accepted values or a numeric range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterSelection {
    Values { selected_values: Vec<String> },
    Range { selected_range: FilterRange },
}

/// Inclusive numeric bounds; either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
}

impl StudyConfig {
    /// Check every rule and report all violations at once.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDefinition`] listing each problem found.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut problems = Vec::new();

        if self.title.trim().is_empty() {
            problems.push("title must not be empty".to_string());
        }
        if self.description.trim().is_empty() {
            problems.push("description must not be empty".to_string());
        }
        if self.questions.is_empty() {
            problems.push("at least one question is required".to_string());
        }

        let mut seen = HashSet::new();
        for question in &self.questions {
            if question.id.trim().is_empty() {
                problems.push("question id must not be empty".to_string());
            } else if !question.id.chars().all(is_id_char) {
                problems.push(format!(
                    "question id '{}' may only use ASCII letters, digits, '_' and '-'",
                    question.id
                ));
            } else if RESERVED_FIELDS.contains(&question.id.as_str()) {
                problems.push(format!(
                    "question id '{}' is reserved for a report column",
                    question.id
                ));
            } else if !seen.insert(question.id.as_str()) {
                problems.push(format!("duplicate question id '{}'", question.id));
            }
            problems.extend(question.problems());
        }

        if !self.reward.is_finite() || self.reward <= 0.0 {
            problems.push(format!("reward must be positive, got {}", self.reward));
        }
        if self.participants == 0 {
            problems.push("participants must be at least 1".to_string());
        }
        if self.estimated_minutes == 0 {
            problems.push("estimated_minutes must be at least 1".to_string());
        }
        if self.max_minutes < self.estimated_minutes {
            problems.push(format!(
                "max_minutes ({}) must not be below estimated_minutes ({})",
                self.max_minutes, self.estimated_minutes
            ));
        }
        if self.device_compatibility.is_empty() {
            problems.push("device_compatibility must list at least one device".to_string());
        }
        for device in &self.device_compatibility {
            if !DEVICES.contains(&device.as_str()) {
                problems.push(format!(
                    "unknown device '{device}' (expected one of {})",
                    DEVICES.join(", ")
                ));
            }
        }
        for filter in &self.filters {
            problems.extend(filter.problems());
        }
        if self.completion_code_prefix.trim().is_empty() {
            problems.push("completion_code_prefix must not be empty".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidDefinition(problems))
        }
    }

    /// Reward in integer cents, as the platform expects.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn reward_cents(&self) -> u32 {
        (self.reward * 100.0).round().max(0.0) as u32
    }

    /// Look up a question by its local id.
    #[must_use]
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Researcher-facing name, unique per creation time.
    #[must_use]
    pub fn internal_name(&self, now: DateTime<Utc>) -> String {
        let prefix = self.internal_name_prefix.as_deref().unwrap_or(&self.title);
        format!("{prefix} {}", now.format("%Y%m%d_%H%M%S"))
    }

    /// Completion code participants receive when they finish.
    #[must_use]
    pub fn completion_code(&self, now: DateTime<Utc>) -> String {
        format!(
            "{}_{}",
            self.completion_code_prefix,
            now.format("%Y%m%d_%H%M%S")
        )
    }
}

const fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

impl Question {
    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.prompt.trim().is_empty() {
            problems.push(format!("question '{}' has an empty prompt", self.id));
        }
        if self.kind.has_options() {
            if self.options.len() < 2 {
                problems.push(format!(
                    "{} question '{}' needs at least two options",
                    self.kind, self.id
                ));
            }
            let mut seen = HashSet::new();
            for option in &self.options {
                if option.trim().is_empty() {
                    problems.push(format!("question '{}' has an empty option", self.id));
                } else if option.contains(ANSWER_SEPARATOR) {
                    problems.push(format!(
                        "question '{}' option '{option}' contains the answer separator '{ANSWER_SEPARATOR}'",
                        self.id
                    ));
                } else if !seen.insert(option.as_str()) {
                    problems.push(format!(
                        "question '{}' repeats option '{option}'",
                        self.id
                    ));
                }
            }
        } else if !self.options.is_empty() {
            problems.push(format!(
                "text question '{}' must not define options",
                self.id
            ));
        }
        problems
    }
}

impl EligibilityFilter {
    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.filter_id.trim().is_empty() {
            problems.push("filter_id must not be empty".to_string());
        }
        match &self.selection {
            FilterSelection::Values { selected_values } if selected_values.is_empty() => {
                problems.push(format!(
                    "filter '{}' selects no values",
                    self.filter_id
                ));
            }
            FilterSelection::Range { selected_range } => match (selected_range.lower, selected_range.upper) {
                (None, None) => problems.push(format!(
                    "filter '{}' range needs a lower or upper bound",
                    self.filter_id
                )),
                (Some(lower), Some(upper)) if lower > upper => problems.push(format!(
                    "filter '{}' range is inverted ({lower} > {upper})",
                    self.filter_id
                )),
                _ => {}
            },
            FilterSelection::Values { .. } => {}
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn sample() -> StudyConfig {
        StudyConfig {
            title: "AI in daily life".into(),
            internal_name_prefix: None,
            description: "One quick question".into(),
            questions: vec![Question {
                id: "usage".into(),
                prompt: "How often do you use AI tools?".into(),
                kind: QuestionKind::Single,
                options: vec!["Daily".into(), "Weekly".into(), "Never".into()],
            }],
            reward: 0.5,
            participants: 30,
            estimated_minutes: 2,
            max_minutes: 10,
            device_compatibility: default_devices(),
            privacy_notice: String::new(),
            filters: vec![],
            completion_code_prefix: default_code_prefix(),
        }
    }

    #[test]
    fn valid_definition_passes() {
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn collects_every_problem() {
        let mut config = sample();
        config.title = "  ".into();
        config.reward = 0.0;
        config.participants = 0;
        config.questions.push(config.questions[0].clone());

        let Err(CoreError::InvalidDefinition(problems)) = config.validate() else {
            panic!("expected invalid definition");
        };
        assert_eq!(problems.len(), 4);
        assert!(problems.iter().any(|p| p.contains("duplicate question id 'usage'")));
    }

    fn with_question_id(id: &str) -> StudyConfig {
        let mut config = sample();
        config.questions[0].id = id.into();
        config
    }

    fn problems(config: &StudyConfig) -> Vec<String> {
        match config.validate() {
            Err(CoreError::InvalidDefinition(problems)) => problems,
            other => panic!("expected invalid definition, got {other:?}"),
        }
    }

    #[rstest]
    #[case("participant_id")]
    #[case("generation")]
    #[case("gender")]
    #[case("age")]
    #[case("completed_at")]
    fn question_ids_cannot_shadow_report_columns(#[case] id: &str) {
        assert_eq!(
            problems(&with_question_id(id)),
            vec![format!("question id '{id}' is reserved for a report column")]
        );
    }

    #[rstest]
    #[case("how often")]
    #[case("usage/daily")]
    #[case("usage.v2")]
    #[case("häufig")]
    fn question_ids_must_be_file_name_safe(#[case] id: &str) {
        let found = problems(&with_question_id(id));
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("may only use ASCII letters"), "{found:?}");
    }

    #[rstest]
    #[case("how_often")]
    #[case("Q-2")]
    #[case("gender_identity")]
    fn safe_question_ids_pass(#[case] id: &str) {
        assert_eq!(with_question_id(id).validate(), Ok(()));
    }

    #[test]
    fn options_cannot_contain_the_answer_separator() {
        let mut config = sample();
        config.questions[0].options = vec!["Yes; sometimes".into(), "No".into()];
        assert_eq!(
            problems(&config),
            vec!["question 'usage' option 'Yes; sometimes' contains the answer separator '; '".to_string()]
        );

        config.questions[0].options = vec!["Yes;sometimes".into(), "No".into()];
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn choice_questions_need_options_and_text_must_not_have_them() {
        let mut config = sample();
        config.questions = vec![
            Question {
                id: "pick".into(),
                prompt: "Pick".into(),
                kind: QuestionKind::Multiple,
                options: vec!["Only".into()],
            },
            Question {
                id: "why".into(),
                prompt: "Why?".into(),
                kind: QuestionKind::Text,
                options: vec!["nope".into()],
            },
        ];
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("needs at least two options"));
        assert!(err.contains("must not define options"));
    }

    #[test]
    fn filter_rules() {
        let mut config = sample();
        config.filters = vec![
            EligibilityFilter {
                filter_id: "age".into(),
                selection: FilterSelection::Range {
                    selected_range: FilterRange {
                        lower: Some(65.0),
                        upper: Some(18.0),
                    },
                },
            },
            EligibilityFilter {
                filter_id: "sex".into(),
                selection: FilterSelection::Values {
                    selected_values: vec![],
                },
            },
        ];
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("range is inverted"));
        assert!(err.contains("selects no values"));
    }

    #[test]
    fn filters_deserialize_from_platform_shape() {
        let json = r#"[
            {"filter_id": "age", "selected_range": {"lower": 18, "upper": 40}},
            {"filter_id": "sex", "selected_values": ["0", "1"]}
        ]"#;
        let filters: Vec<EligibilityFilter> = serde_json::from_str(json).unwrap();
        assert!(matches!(
            filters[0].selection,
            FilterSelection::Range { selected_range } if selected_range.upper == Some(40.0)
        ));
        assert!(matches!(
            &filters[1].selection,
            FilterSelection::Values { selected_values } if selected_values.len() == 2
        ));
    }

    #[test]
    fn reward_is_rounded_to_cents() {
        let mut config = sample();
        config.reward = 1.005;
        assert_eq!(config.reward_cents(), 100);
        config.reward = 2.5;
        assert_eq!(config.reward_cents(), 250);
    }

    #[test]
    fn names_and_codes_carry_timestamp() {
        let config = sample();
        let now = Utc.with_ymd_and_hms(2025, 9, 29, 13, 8, 0).unwrap();
        assert_eq!(config.internal_name(now), "AI in daily life 20250929_130800");
        assert_eq!(config.completion_code(now), "SVY_20250929_130800");
    }
}
