use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `tempo` binary.
#[derive(Debug, Parser)]
#[command(name = "tempo", version, about = "tempo - issues, tasks and timesheets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Table colors: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Database file (defaults to general.database_path)
    #[arg(long, global = true)]
    pub db: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            color: self.color,
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::{IssueCommands, TimerCommands};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "tempo", "--format", "table", "--limit", "10", "--verbose", "tag", "list",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Tag { .. }));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["tempo", "tag", "list", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["tempo", "--format", "xml", "tag", "list"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn db_override_reaches_global_flags() {
        let cli = Cli::try_parse_from(["tempo", "--db", "/tmp/t.db", "customer", "list"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.db.as_deref(), Some("/tmp/t.db"));
    }

    #[test]
    fn timer_start_accepts_continue() {
        let cli = Cli::try_parse_from(["tempo", "timer", "start", "tsk-1", "--continue"])
            .expect("cli should parse");
        let Commands::Timer { action } = cli.command else {
            panic!("expected timer command");
        };
        assert!(matches!(
            action,
            TimerCommands::Start { ref task, resume: true } if task == "tsk-1"
        ));
    }

    #[test]
    fn issue_create_collects_repeated_labels() {
        let cli = Cli::try_parse_from([
            "tempo",
            "issue",
            "create",
            "--project",
            "site",
            "--title",
            "Fix login",
            "--milestone",
            "v1.0",
            "--label",
            "bug",
            "--label",
            "backend",
            "--task",
        ])
        .expect("cli should parse");
        let Commands::Issue { action } = cli.command else {
            panic!("expected issue command");
        };
        let IssueCommands::Create { labels, task, .. } = action else {
            panic!("expected issue create");
        };
        assert_eq!(labels, vec!["bug", "backend"]);
        assert!(task);
    }

    #[test]
    fn issue_create_requires_milestone() {
        let parsed = Cli::try_parse_from([
            "tempo", "issue", "create", "--project", "site", "--title", "Fix login",
        ]);
        assert!(parsed.is_err());
    }
}
