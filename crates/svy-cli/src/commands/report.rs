use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;
use svy_client::{HttpTransport, SurveyClient};
use svy_config::ReportConfig;
use svy_report::{DirectorySink, ReportOutput, Reporter, StudySummary};

use crate::cli::{GlobalFlags, ReportArgs};
use crate::context::AppContext;
use crate::output::output;
use crate::state::StudyState;

#[derive(Debug, Serialize)]
pub struct ReportView {
    pub summary: StudySummary,
    pub output_dir: PathBuf,
    pub artifacts: Vec<PathBuf>,
}

/// Handle `svy report`.
pub async fn handle(args: &ReportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = ctx.client()?;
    let state = ctx.load_state()?;
    let view = fetch_and_report(&client, args, &state, &ctx.config.report).await?;
    output(&view, flags.format)
}

/// Fetch submissions for the saved study and write every artifact.
pub async fn fetch_and_report(
    client: &SurveyClient<HttpTransport>,
    args: &ReportArgs,
    state: &StudyState,
    config: &ReportConfig,
) -> anyhow::Result<ReportView> {
    let submissions = client
        .get_submissions(&state.study)
        .await
        .with_context(|| format!("failed to fetch submissions for {}", state.study.id))?;
    if submissions.is_empty() {
        tracing::warn!(study = %state.study.id, "study has no submissions yet");
    }

    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output_dir));
    let summary = StudySummary::build(&state.study, &submissions, &config.display_timezone)?;

    let mut reporter = Reporter::new(DirectorySink::new(&output_dir))
        .with_csv_file(&config.csv_file)
        .with_label_wrap(config.label_wrap)
        .with_titles(state.prompts.clone());
    let ReportOutput { artifacts, .. } = reporter
        .write_report(&submissions)
        .with_context(|| format!("failed to write report to {}", output_dir.display()))?;

    Ok(ReportView {
        summary,
        output_dir,
        artifacts,
    })
}
