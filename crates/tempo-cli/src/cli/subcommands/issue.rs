use clap::Subcommand;

/// Issue commands. `<id>` is an issue ID, or `#<number>` with `--project`.
#[derive(Clone, Debug, Subcommand)]
pub enum IssueCommands {
    /// Create an issue on GitLab and mirror it locally.
    Create {
        #[arg(long)]
        project: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: Option<String>,
        #[arg(long = "label")]
        labels: Vec<String>,
        /// Milestone title.
        #[arg(long)]
        milestone: String,
        /// Also create the task for the issue.
        #[arg(long)]
        task: bool,
    },
    /// Mirror a project's GitLab issues.
    Sync {
        #[arg(long)]
        project: String,
        /// opened, closed or all
        #[arg(long, default_value = "opened")]
        state: String,
    },
    /// List issues.
    List {
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        sprint: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get an issue with its labels and task.
    Get {
        id: String,
        #[arg(long)]
        project: Option<String>,
    },
    /// Update local issue fields.
    Update {
        id: String,
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
        /// Milestone title.
        #[arg(long)]
        milestone: Option<String>,
        /// Replace the issue's labels.
        #[arg(long = "label")]
        labels: Option<Vec<String>>,
    },
    /// Close an issue.
    Close {
        id: String,
        #[arg(long)]
        project: Option<String>,
    },
    /// Reopen a closed issue.
    Reopen {
        id: String,
        #[arg(long)]
        project: Option<String>,
    },
    /// Write the issue into its milestone changelog.
    Changelog {
        id: String,
        #[arg(long)]
        project: Option<String>,
    },
}
