use clap::Subcommand;

/// Task entity commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// Create a task.
    Create {
        #[arg(long)]
        project: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        annotation: Option<String>,
        /// Hours, up to two decimals.
        #[arg(long)]
        estimate: Option<String>,
        /// Planned start, `HH:MM`.
        #[arg(long)]
        start: Option<String>,
        /// Planned end, `HH:MM`.
        #[arg(long)]
        end: Option<String>,
    },
    /// Create the task of an issue.
    FromIssue {
        issue: String,
        #[arg(long)]
        project: Option<String>,
    },
    /// List tasks.
    List {
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a task with its tags and timesheets.
    Get { id: String },
    /// Update a task.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        annotation: Option<String>,
        #[arg(long)]
        report: Option<String>,
        #[arg(long)]
        estimate: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Close a task.
    Close { id: String },
    /// Tag a task, creating the tag when missing.
    Tag { id: String, tag: String },
    /// Remove a tag from a task.
    Untag { id: String, tag: String },
}
