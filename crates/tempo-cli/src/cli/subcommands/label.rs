use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum LabelCommands {
    /// Create a label.
    Create {
        label: String,
        /// `#RRGGBB`, defaults to white.
        #[arg(long)]
        color: Option<String>,
    },
    /// List labels.
    List,
    /// Create missing labels from a project's GitLab labels.
    Sync {
        #[arg(long)]
        project: String,
    },
}
