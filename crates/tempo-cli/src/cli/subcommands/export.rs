use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum ExportCommands {
    /// Write the project's timesheet workbook.
    Timesheet {
        #[arg(long)]
        project: String,
        /// Write csv files instead of the configured format.
        #[arg(long)]
        csv: bool,
        /// Output folder (defaults to the project folder).
        #[arg(long)]
        out: Option<String>,
    },
}
