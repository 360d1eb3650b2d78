//! The `timesheet_{project}.xlsx` workbook.
//!
//! Two sheets: `timesheet` with one row per timesheet and `total_hours`
//! with one row per day. The workbook is rebuilt from scratch on each export.

use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet, XlsxError};
use tempo_core::report::DailyHours;

use crate::error::ExportError;
use crate::paths::ensure_parent;
use crate::rows::{TIMESHEET_HEADERS, TOTAL_HOURS_HEADERS, TimesheetRow};

pub const TIMESHEET_SHEET: &str = "timesheet";
pub const TOTAL_HOURS_SHEET: &str = "total_hours";

fn header_format() -> Format {
    Format::new().set_bold().set_font_name("Calibri")
}

fn centered() -> Format {
    Format::new().set_align(FormatAlign::Center)
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str]) -> Result<(), XlsxError> {
    let bold = header_format();
    for (col, header) in (0_u16..).zip(headers) {
        sheet.write_string_with_format(0, col, *header, &bold)?;
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn as_number(value: u64) -> f64 {
    value as f64
}

fn write_timesheet_sheet(sheet: &mut Worksheet, rows: &[TimesheetRow]) -> Result<(), XlsxError> {
    sheet.set_name(TIMESHEET_SHEET)?;
    write_headers(sheet, &TIMESHEET_HEADERS)?;
    let center = centered();

    for (row_num, row) in (1_u32..).zip(rows) {
        sheet.write_string(row_num, 0, &row.date)?;
        sheet.write_string(row_num, 1, &row.start)?;
        sheet.write_string(row_num, 2, &row.end)?;
        sheet.write_string(row_num, 3, &row.tempo)?;
        sheet.write_string(row_num, 4, &row.tempo_display)?;
        if let Some(issue) = row.issue {
            sheet.write_number_with_format(row_num, 5, as_number(issue), &center)?;
        }
        sheet.write_string(row_num, 6, &row.title)?;
    }
    Ok(())
}

fn write_total_hours_sheet(sheet: &mut Worksheet, days: &[DailyHours]) -> Result<(), XlsxError> {
    sheet.set_name(TOTAL_HOURS_SHEET)?;
    write_headers(sheet, &TOTAL_HOURS_HEADERS)?;
    let center = centered();

    for (row_num, day) in (1_u32..).zip(days) {
        sheet.write_string(row_num, 0, &day.date)?;
        sheet.write_number_with_format(row_num, 1, f64::from(day.month), &center)?;
        sheet.write_string(row_num, 2, &day.total_hours)?;
        sheet.write_string(row_num, 3, &day.total_hours_display)?;
        sheet.write_string(row_num, 4, &day.issues)?;
        if let Some(sprint) = day.sprint {
            sheet.write_number_with_format(row_num, 5, f64::from(sprint), &center)?;
        }
    }
    Ok(())
}

/// Write both sheets to `path`, replacing any existing workbook.
///
/// # Errors
///
/// Returns [`ExportError`] if the folder cannot be created or the workbook
/// cannot be written.
pub fn write_workbook(
    path: &Path,
    rows: &[TimesheetRow],
    days: &[DailyHours],
) -> Result<(), ExportError> {
    ensure_parent(path)?;
    let mut workbook = Workbook::new();
    write_timesheet_sheet(workbook.add_worksheet(), rows)?;
    write_total_hours_sheet(workbook.add_worksheet(), days)?;
    workbook.save(path)?;
    tracing::debug!(
        path = %path.display(),
        rows = rows.len(),
        days = days.len(),
        "workbook written"
    );
    Ok(())
}
