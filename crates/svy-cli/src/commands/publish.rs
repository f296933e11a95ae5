use anyhow::Context;
use svy_client::{HttpTransport, SurveyClient};
use svy_core::Study;

use crate::cli::GlobalFlags;
use crate::commands::status::StudyView;
use crate::context::AppContext;
use crate::output::output;
use crate::state::StudyState;

/// Handle `svy publish`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = ctx.client()?;
    let mut state = ctx.load_state()?;
    let study = publish_and_save(&client, &mut state, ctx).await?;
    output(&StudyView::from(&study), flags.format)
}

pub async fn publish_and_save(
    client: &SurveyClient<HttpTransport>,
    state: &mut StudyState,
    ctx: &AppContext,
) -> anyhow::Result<Study> {
    let study = client
        .publish(&state.study)
        .await
        .with_context(|| format!("failed to publish study {}", state.study.id))?;
    tracing::info!(study = %study.id, status = %study.status, "study published");
    state.update(study.clone());
    ctx.save_state(state)?;
    Ok(study)
}
