mod customer;
mod export;
mod issue;
mod label;
mod milestone;
mod project;
mod report;
mod sprint;
mod tag;
mod task;
mod timer;

pub use customer::CustomerCommands;
pub use export::ExportCommands;
pub use issue::IssueCommands;
pub use label::LabelCommands;
pub use milestone::MilestoneCommands;
pub use project::ProjectCommands;
pub use report::ReportCommands;
pub use sprint::SprintCommands;
pub use tag::TagCommands;
pub use task::TaskCommands;
pub use timer::TimerCommands;
