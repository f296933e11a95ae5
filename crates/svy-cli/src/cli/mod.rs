use std::path::PathBuf;

use clap::Parser;

pub mod commands;
pub mod global;

pub use commands::{Commands, ReportArgs, RunArgs, StudyFileArgs, WaitArgs};
pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `svy` binary.
#[derive(Debug, Parser)]
#[command(name = "svy", version, about = "Surveyor - run survey studies end to end")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Study state file (defaults to general.state_file)
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// Extra config file layered above svy.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            state: self.state.clone(),
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["svy", "--format", "json", "--verbose", "status"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["svy", "publish", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Publish));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["svy", "--format", "xml", "status"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn wait_overrides_are_optional() {
        let cli = Cli::try_parse_from(["svy", "wait", "--interval", "5"]).expect("cli should parse");
        let Commands::Wait(args) = cli.command else {
            panic!("expected wait");
        };
        assert_eq!(args.interval, Some(5));
        assert_eq!(args.max_wait, None);
    }

    #[test]
    fn run_takes_study_and_report_flags() {
        let cli = Cli::try_parse_from([
            "svy", "run", "--study", "study.yaml", "--output", "out", "--max-wait", "600",
        ])
        .expect("cli should parse");
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.study, Path::new("study.yaml"));
        assert_eq!(args.report.output.as_deref(), Some(Path::new("out")));
        assert_eq!(args.wait.max_wait, Some(600));
    }

    #[test]
    fn create_requires_study_file() {
        assert!(Cli::try_parse_from(["svy", "create"]).is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["svy", "--state", "/tmp/s.json", "status"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.state.as_deref(), Some(Path::new("/tmp/s.json")));
        assert_eq!(flags.format, OutputFormat::Table);
    }
}
