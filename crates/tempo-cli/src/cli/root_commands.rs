use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    CustomerCommands, ExportCommands, IssueCommands, LabelCommands, MilestoneCommands,
    ProjectCommands, ReportCommands, SprintCommands, TagCommands, TaskCommands, TimerCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Customers.
    Customer {
        #[command(subcommand)]
        action: CustomerCommands,
    },
    /// Projects.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Sprints.
    Sprint {
        #[command(subcommand)]
        action: SprintCommands,
    },
    /// Milestones.
    Milestone {
        #[command(subcommand)]
        action: MilestoneCommands,
    },
    /// Labels.
    Label {
        #[command(subcommand)]
        action: LabelCommands,
    },
    /// Task tags.
    Tag {
        #[command(subcommand)]
        action: TagCommands,
    },
    /// Issues mirrored from GitLab.
    Issue {
        #[command(subcommand)]
        action: IssueCommands,
    },
    /// Tasks.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Start and stop timesheets.
    Timer {
        #[command(subcommand)]
        action: TimerCommands,
    },
    /// Hour reports.
    Report {
        #[command(subcommand)]
        action: ReportCommands,
    },
    /// Spreadsheet exports.
    Export {
        #[command(subcommand)]
        action: ExportCommands,
    },
    /// Query the audit trail.
    Audit(AuditArgs),
    /// Dump JSON schema for a response type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    #[arg(long)]
    pub entity_type: Option<String>,
    #[arg(long)]
    pub entity_id: Option<String>,
    #[arg(long)]
    pub action: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    pub type_name: String,
}
