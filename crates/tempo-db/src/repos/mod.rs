//! Repository modules implementing CRUD operations for all tempo entities.
//!
//! Each module adds methods to `TempoService` via `impl TempoService` blocks.

pub mod audit;
pub mod customer;
pub mod issue;
pub mod label;
pub mod milestone;
pub mod project;
pub mod sprint;
pub mod tag;
pub mod task;
pub mod timesheet;
