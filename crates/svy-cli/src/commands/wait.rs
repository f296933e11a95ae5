use svy_client::{ClientError, HttpTransport, SurveyClient, wait_until_complete};
use svy_core::Study;

use crate::cli::{GlobalFlags, WaitArgs};
use crate::commands::status::{self, StudyView};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;
use crate::state::StudyState;

/// Handle `svy wait`.
pub async fn handle(args: &WaitArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = ctx.client()?;
    let mut state = ctx.load_state()?;
    let study = wait_and_save(&client, args, &mut state, ctx).await?;
    output(&StudyView::from(&study), flags.format)
}

/// Poll with a spinner, saving the final state. On timeout the last seen
/// status is kept in the state file before the error is returned.
pub async fn wait_and_save(
    client: &SurveyClient<HttpTransport>,
    args: &WaitArgs,
    state: &mut StudyState,
    ctx: &AppContext,
) -> anyhow::Result<Study> {
    let options = ctx.poll_options(args);
    let progress = Progress::spinner(&format!("waiting for study {}", state.study.id));
    let mut last_seen = None;

    let result = wait_until_complete(client, &state.study, options, |study| {
        progress.set_message(&format!(
            "{} {}/{} places taken ({})",
            study.status.as_platform_str(),
            study.places_taken,
            study.total_available_places,
            status::percent(study)
        ));
        last_seen = Some(study.clone());
    })
    .await;

    match result {
        Ok(study) => {
            progress.finish_ok(&format!("study {}", study.status.as_platform_str()));
            state.update(study.clone());
            ctx.save_state(state)?;
            Ok(study)
        }
        Err(error) => {
            progress.finish_err("stopped waiting");
            if let Some(study) = last_seen {
                state.update(study);
                ctx.save_state(state)?;
            }
            if matches!(error, ClientError::Timeout { .. }) {
                tracing::warn!(study = %state.study.id, "wait limit reached");
            }
            Err(error.into())
        }
    }
}
