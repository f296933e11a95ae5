use anyhow::Context;
use svy_client::{HttpTransport, SurveyClient};
use svy_config::load_study_definition;
use svy_core::Study;

use crate::cli::{GlobalFlags, StudyFileArgs};
use crate::commands::status::StudyView;
use crate::context::AppContext;
use crate::output::output;
use crate::state::StudyState;

/// Handle `svy create`: create the survey and draft study, then save it.
pub async fn handle(args: &StudyFileArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = ctx.client()?;
    let study = create_and_save(&client, args, ctx).await?;
    output(&StudyView::from(&study), flags.format)
}

pub async fn create_and_save(
    client: &SurveyClient<HttpTransport>,
    args: &StudyFileArgs,
    ctx: &AppContext,
) -> anyhow::Result<Study> {
    let definition = load_study_definition(&args.study)
        .with_context(|| format!("study definition {} is not valid", args.study.display()))?;
    let study = client
        .create(&definition)
        .await
        .context("failed to create study")?;
    tracing::info!(study = %study.id, "study created");
    ctx.save_state(&StudyState::new(study.clone(), &definition))?;
    Ok(study)
}
