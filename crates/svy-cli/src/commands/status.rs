use serde::Serialize;
use svy_core::Study;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Compact view of a study for terminal output.
#[derive(Debug, Serialize)]
pub struct StudyView {
    pub id: String,
    pub name: String,
    pub status: &'static str,
    pub places_taken: u32,
    pub total_available_places: u32,
    /// Share of places taken, e.g. `"40%"`.
    pub filled: String,
    pub survey_id: Option<String>,
    pub published_at: Option<String>,
}

impl From<&Study> for StudyView {
    fn from(study: &Study) -> Self {
        Self {
            id: study.id.clone(),
            name: study.name.clone(),
            status: study.status.as_platform_str(),
            places_taken: study.places_taken,
            total_available_places: study.total_available_places,
            filled: percent(study),
            survey_id: study.survey_id.clone(),
            published_at: study.published_at.map(|t| t.to_rfc3339()),
        }
    }
}

pub fn percent(study: &Study) -> String {
    format!("{:.0}%", study.fill_ratio() * 100.0)
}

/// Handle `svy status`: refresh the saved study from the platform.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = ctx.client()?;
    let mut state = ctx.load_state()?;
    let study = client.refresh(&state.study).await?;
    state.update(study);
    ctx.save_state(&state)?;
    output(&StudyView::from(&state.study), flags.format)
}
