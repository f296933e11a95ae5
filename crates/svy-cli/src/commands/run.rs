use crate::cli::{GlobalFlags, RunArgs, StudyFileArgs};
use crate::commands::{create, publish, report, wait};
use crate::context::AppContext;
use crate::output::output;

/// Handle `svy run`: the whole pipeline, saving state after every step so a
/// failed run can be resumed with the individual commands.
pub async fn handle(args: &RunArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = ctx.client()?;

    let study_args = StudyFileArgs {
        study: args.study.clone(),
    };
    let study = create::create_and_save(&client, &study_args, ctx).await?;
    tracing::info!(study = %study.id, "step 1/4: created");

    let mut state = ctx.load_state()?;
    publish::publish_and_save(&client, &mut state, ctx).await?;
    tracing::info!(study = %study.id, "step 2/4: published");

    wait::wait_and_save(&client, &args.wait, &mut state, ctx).await?;
    tracing::info!(study = %study.id, "step 3/4: finished collecting");

    let view = report::fetch_and_report(&client, &args.report, &state, &ctx.config.report).await?;
    tracing::info!(study = %study.id, artifacts = view.artifacts.len(), "step 4/4: reported");

    output(&view, flags.format)
}
