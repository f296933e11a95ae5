use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `svy fetch`: print every submission with demographics.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = ctx.client()?;
    let state = ctx.load_state()?;
    let submissions = client
        .get_submissions(&state.study)
        .await
        .with_context(|| format!("failed to fetch submissions for {}", state.study.id))?;
    output(&submissions, flags.format)
}
