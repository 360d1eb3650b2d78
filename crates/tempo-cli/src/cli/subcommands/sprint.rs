use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum SprintCommands {
    /// Open a sprint. Defaults to the number after the last sprint.
    Create {
        #[arg(long)]
        project: String,
        #[arg(long)]
        number: Option<u16>,
    },
    /// List a project's sprints, oldest first.
    List {
        #[arg(long)]
        project: String,
    },
}
