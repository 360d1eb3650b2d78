use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum TimerCommands {
    /// Start a timesheet on a task.
    Start {
        task: String,
        /// Start where the project's last timesheet ended.
        #[arg(long = "continue")]
        resume: bool,
    },
    /// Stop the task's running timesheet.
    Stop { task: String },
    /// List timesheets, newest first.
    List {
        #[arg(long)]
        task: Option<String>,
        #[arg(long)]
        running: bool,
        #[arg(long)]
        limit: Option<u32>,
    },
}
