use clap::Subcommand;

/// Project commands. `<project>` is an ID or a title.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Create a project.
    Create {
        title: String,
        #[arg(long)]
        customer: String,
        /// GitLab project ID or path (`group/name`).
        #[arg(long)]
        gitlab: Option<String>,
    },
    /// List projects.
    List {
        /// Include inactive projects.
        #[arg(long)]
        all: bool,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a project.
    Get { project: String },
    /// Update a project.
    Update {
        project: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        customer: Option<String>,
        /// GitLab project ID or path (`group/name`).
        #[arg(long)]
        gitlab: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a project with its sprints, issues, tasks and timesheets.
    Delete { project: String },
}
