use anyhow::Context;
use serde::Serialize;
use svy_config::load_study_definition;
use svy_core::StudyConfig;

use crate::cli::{GlobalFlags, StudyFileArgs};
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct DefinitionView {
    pub title: String,
    pub questions: usize,
    pub participants: u32,
    pub reward_cents: u32,
    pub estimated_minutes: u32,
    pub filters: usize,
}

impl From<&StudyConfig> for DefinitionView {
    fn from(config: &StudyConfig) -> Self {
        Self {
            title: config.title.clone(),
            questions: config.questions.len(),
            participants: config.participants,
            reward_cents: config.reward_cents(),
            estimated_minutes: config.estimated_minutes,
            filters: config.filters.len(),
        }
    }
}

/// Handle `svy validate`: load and check a definition, offline.
pub fn handle(args: &StudyFileArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let definition = load_study_definition(&args.study)
        .with_context(|| format!("study definition {} is not valid", args.study.display()))?;
    output(&DefinitionView::from(&definition), flags.format)
}
