//! Entity structs for all tempo domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `tempo-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON output and schema dumps.

mod audit;
mod customer;
mod issue;
mod label;
mod milestone;
mod project;
mod sprint;
mod tag;
mod task;
mod timesheet;

pub use audit::AuditEntry;
pub use customer::Customer;
pub use issue::Issue;
pub use label::{DEFAULT_LABEL_COLOR, Label, is_valid_color, labels_display};
pub use milestone::Milestone;
pub use project::Project;
pub use sprint::Sprint;
pub use tag::Tag;
pub use task::{Estimate, Task};
pub use timesheet::Timesheet;
