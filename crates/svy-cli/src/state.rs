//! The study handle persisted between CLI invocations.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use svy_core::{Study, StudyConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyState {
    pub study: Study,
    /// Question id → prompt, used as chart titles.
    #[serde(default)]
    pub prompts: BTreeMap<String, String>,
    pub updated_at: DateTime<Utc>,
}

impl StudyState {
    pub fn new(study: Study, definition: &StudyConfig) -> Self {
        let prompts = definition
            .questions
            .iter()
            .map(|q| (q.id.clone(), q.prompt.clone()))
            .collect();
        Self {
            study,
            prompts,
            updated_at: Utc::now(),
        }
    }

    /// Replace the study with a fresher copy.
    pub fn update(&mut self, study: Study) {
        self.study = study;
        self.updated_at = Utc::now();
    }
}

pub fn load(path: &Path) -> anyhow::Result<StudyState> {
    if !path.exists() {
        anyhow::bail!(
            "no study state at {}; run 'svy create --study <file>' first",
            path.display()
        );
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read study state {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("study state {} is not valid", path.display()))
}

pub fn save(path: &Path, state: &StudyState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(state)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("failed to replace {}", path.display()))?;
    tracing::debug!(path = %path.display(), study = %state.study.id, "study state saved");
    Ok(())
}
