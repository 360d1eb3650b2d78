//! # tempo-core
//!
//! Core types shared across all tempo crates:
//! - Entity structs for customers, projects, sprints, issues, tasks and timesheets
//! - The shared work-item status enum with its transition rules
//! - ID prefix constants
//! - Cross-cutting error types
//! - Hour/duration display helpers
//! - Daily hour aggregation used by reports and spreadsheet exports
//! - CLI response types

pub mod audit_detail;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod hours;
pub mod ids;
pub mod report;
pub mod responses;
