//! # tempo-export
//!
//! File side effects of the tracker, rooted at the configured base folder:
//! - the task notes file a new issue is appended to
//! - per-milestone markdown changelogs
//! - the timesheet workbook (xlsx, or a pair of csv files)

pub mod changelog;
pub mod csv_export;
pub mod notes;
pub mod paths;
pub mod rows;
pub mod spreadsheet;

mod error;

pub use error::ExportError;
pub use paths::ProjectPaths;

use std::fmt::Display;
use std::path::PathBuf;

use chrono::TimeZone;
use tempo_config::ExportFormat;
use tempo_core::report::{TimesheetRecord, group_by_date};

/// What an export wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub files: Vec<PathBuf>,
    pub timesheet_rows: usize,
    pub day_rows: usize,
}

/// Write a project's timesheet export in `format`.
///
/// `records` must be in sheet order (tasks by creation, timesheets oldest
/// first). Days are grouped in `tz`.
///
/// # Errors
///
/// Returns [`ExportError`] if any output file cannot be written.
pub fn export_timesheet<Tz>(
    paths: &ProjectPaths,
    format: ExportFormat,
    records: &[TimesheetRecord],
    tz: &Tz,
) -> Result<ExportSummary, ExportError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let rows = rows::timesheet_rows(records, tz);
    let days = group_by_date(records, tz);

    let files = match format {
        ExportFormat::Xlsx => {
            let path = paths.timesheet_xlsx();
            spreadsheet::write_workbook(&path, &rows, &days)?;
            vec![path]
        }
        ExportFormat::Csv => {
            let timesheet = paths.timesheet_csv();
            let total_hours = paths.total_hours_csv();
            csv_export::write_timesheet_csv(&timesheet, &rows)?;
            csv_export::write_total_hours_csv(&total_hours, &days)?;
            vec![timesheet, total_hours]
        }
    };

    tracing::info!(
        %format,
        rows = rows.len(),
        days = days.len(),
        "timesheet exported"
    );
    Ok(ExportSummary {
        files,
        timesheet_rows: rows.len(),
        day_rows: days.len(),
    })
}
