use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum MilestoneCommands {
    /// Register a milestone by its GitLab ID.
    Create {
        #[arg(long)]
        project: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        original_id: u64,
    },
    /// List a project's milestones.
    List {
        #[arg(long)]
        project: String,
    },
    /// Mirror the project's GitLab milestones.
    Sync {
        #[arg(long)]
        project: String,
    },
}
