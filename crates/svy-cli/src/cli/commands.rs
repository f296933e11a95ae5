use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create a draft study (and its survey) from a study definition file.
    Create(StudyFileArgs),
    /// Publish the current study.
    Publish,
    /// Show the current study's status.
    Status,
    /// Poll until the current study completes or the wait limit is hit.
    Wait(WaitArgs),
    /// Fetch submissions with participant demographics.
    Fetch,
    /// Fetch submissions and write the CSV, charts, and summary.
    Report(ReportArgs),
    /// Create, publish, wait, and report in one go.
    Run(RunArgs),
    /// Check a study definition without contacting the platform.
    Validate(StudyFileArgs),
}

#[derive(Clone, Debug, Args)]
pub struct StudyFileArgs {
    /// Study definition (.toml, .yaml, .yml, or .json)
    #[arg(long)]
    pub study: PathBuf,
}

#[derive(Clone, Debug, Default, Args)]
pub struct WaitArgs {
    /// Seconds between status checks (overrides poll.interval_secs)
    #[arg(long)]
    pub interval: Option<u64>,

    /// Give up after this many seconds (overrides poll.max_wait_secs)
    #[arg(long)]
    pub max_wait: Option<u64>,
}

#[derive(Clone, Debug, Default, Args)]
pub struct ReportArgs {
    /// Output directory (overrides report.output_dir)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    /// Study definition (.toml, .yaml, .yml, or .json)
    #[arg(long)]
    pub study: PathBuf,

    #[command(flatten)]
    pub wait: WaitArgs,

    #[command(flatten)]
    pub report: ReportArgs,
}
