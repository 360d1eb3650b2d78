use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum ReportCommands {
    /// Worked hours per day.
    Hours {
        #[arg(long)]
        project: String,
    },
}
