//! CSV rendition of the timesheet workbook: one file per sheet.

use std::path::Path;

use tempo_core::report::DailyHours;

use crate::error::ExportError;
use crate::paths::ensure_parent;
use crate::rows::{TIMESHEET_HEADERS, TOTAL_HOURS_HEADERS, TimesheetRow};

/// Write the `timesheet` rows to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be created or written.
pub fn write_timesheet_csv(path: &Path, rows: &[TimesheetRow]) -> Result<(), ExportError> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(TIMESHEET_HEADERS)?;
    for row in rows {
        writer.write_record(row.cells())?;
    }
    writer.flush().map_err(|e| ExportError::io(path, e))?;
    Ok(())
}

/// Write the `total_hours` rows to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be created or written.
pub fn write_total_hours_csv(path: &Path, days: &[DailyHours]) -> Result<(), ExportError> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(TOTAL_HOURS_HEADERS)?;
    for day in days {
        writer.write_record([
            day.date.clone(),
            day.month.to_string(),
            day.total_hours.clone(),
            day.total_hours_display.clone(),
            day.issues.clone(),
            day.sprint.map(|s| s.to_string()).unwrap_or_default(),
        ])?;
    }
    writer.flush().map_err(|e| ExportError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn timesheet_csv_layout() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("timesheet_site.csv");
        let rows = vec![TimesheetRow {
            date: "02/03/26".into(),
            start: "09:00".into(),
            end: "10:30".into(),
            tempo: "1:30:00".into(),
            tempo_display: "1h 30m".into(),
            issue: Some(7),
            title: "Export, part 1".into(),
        }];
        write_timesheet_csv(&path, &rows).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "data,hora_inicial,hora_final,tempo,tempo_display,issue,titulo\n\
             02/03/26,09:00,10:30,1:30:00,1h 30m,7,\"Export, part 1\"\n"
        );
    }

    #[test]
    fn total_hours_csv_layout() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("total_hours_site.csv");
        let days = vec![DailyHours {
            day: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            date: "02/03/26".into(),
            month: 3,
            total_hours: "2:30:00".into(),
            total_hours_display: "2h 30m".into(),
            total_seconds: 9000,
            issues: "5, 7".into(),
            sprint: None,
        }];
        write_total_hours_csv(&path, &days).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "data,mês,tempo,tempo_display,issues,sprint\n\
             02/03/26,3,2:30:00,2h 30m,\"5, 7\",\n"
        );
    }
}
