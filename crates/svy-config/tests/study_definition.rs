//! Integration tests for study definition loading.

use std::fs;

use pretty_assertions::assert_eq;
use svy_config::{ConfigError, load_study_definition};
use svy_core::{FilterSelection, QuestionKind};

const YAML: &str = r#"
title: "AI in daily life"
description: "A one-question pulse survey"
reward: 0.75
participants: 50
estimated_minutes: 2
max_minutes: 10
device_compatibility: [desktop, mobile]
privacy_notice: "Responses are anonymous."
filters:
  - filter_id: age
    selected_range:
      lower: 18
      upper: 65
questions:
  - id: usage
    prompt: "How often do you use AI tools in daily life?"
    type: single
    options: ["Daily", "Weekly", "Rarely", "Never"]
  - id: comment
    prompt: "Anything else?"
    type: free_text
"#;

#[test]
fn loads_yaml_definition() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("study.yaml");
    fs::write(&path, YAML).unwrap();

    let study = load_study_definition(&path).expect("definition loads");
    assert_eq!(study.title, "AI in daily life");
    assert_eq!(study.reward_cents(), 75);
    assert_eq!(study.participants, 50);
    assert_eq!(study.questions.len(), 2);
    assert_eq!(study.questions[1].kind, QuestionKind::Text);
    assert_eq!(study.device_compatibility, vec!["desktop", "mobile"]);
    assert_eq!(study.completion_code_prefix, "SVY");
    assert!(matches!(
        study.filters[0].selection,
        FilterSelection::Range { .. }
    ));
}

#[test]
fn loads_toml_definition_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("study.toml");
    fs::write(
        &path,
        r#"
title = "Coffee"
description = "Coffee habits"
reward = 1
participants = 10

[[questions]]
id = "cups"
prompt = "Cups per day?"
type = "single"
options = ["0", "1-2", "3+"]
"#,
    )
    .unwrap();

    let study = load_study_definition(&path).expect("definition loads");
    assert_eq!(study.estimated_minutes, 5);
    assert_eq!(study.max_minutes, 20);
    assert_eq!(study.device_compatibility.len(), 3);
    assert!(study.filters.is_empty());
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_study_definition(&dir.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Missing { .. }));
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("study.ini");
    fs::write(&path, "title=x").unwrap();
    let err = load_study_definition(&path).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn question_named_like_a_demographic_column_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("study.yaml");
    fs::write(&path, YAML.replace("id: usage", "id: gender")).unwrap();

    let err = load_study_definition(&path).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidStudy(_)));
    assert!(err.to_string().contains("'gender' is reserved"));
}

#[test]
fn invalid_definition_surfaces_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("study.yaml");
    fs::write(
        &path,
        r#"
title: "Broken"
description: "No questions"
reward: -1
participants: 5
questions: []
"#,
    )
    .unwrap();

    let err = load_study_definition(&path).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidStudy(_)));
    let message = err.to_string();
    assert!(message.contains("at least one question"));
    assert!(message.contains("reward must be positive"));
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("study.yml");
    fs::write(&path, "title: [unclosed").unwrap();
    let err = load_study_definition(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Figment(_)));
}

#[test]
fn bundled_demo_definition_is_valid() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/study.yaml");
    let config = load_study_definition(&path).expect("demo definition should load");
    assert_eq!(config.questions.len(), 2);
    assert_eq!(config.questions[1].kind, QuestionKind::Multiple);
    assert_eq!(config.reward_cents(), 75);
}
