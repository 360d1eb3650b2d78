//! Export integration tests: whole-project exports into a temp base folder.

use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

use tempo_config::ExportFormat;
use tempo_core::entities::Issue;
use tempo_core::enums::Status;
use tempo_core::report::TimesheetRecord;
use tempo_export::changelog::{append_changelog_entry, ensure_date_section};
use tempo_export::notes::{append_task_note, is_bug};
use tempo_export::{ProjectPaths, export_timesheet};

fn record(id: &str, issue: Option<u64>, day: u32, start: u32, end: u32) -> TimesheetRecord {
    TimesheetRecord {
        timesheet_id: id.into(),
        task_id: "tsk-1".into(),
        task_title: "Task".into(),
        start_time: Utc.with_ymd_and_hms(2026, 3, day, start, 0, 0).unwrap(),
        end_time: Some(Utc.with_ymd_and_hms(2026, 3, day, end, 0, 0).unwrap()),
        issue_number: issue,
        issue_title: issue.map(|n| format!("Issue {n}")),
        sprint_number: Some(1),
    }
}

fn records() -> Vec<TimesheetRecord> {
    vec![
        record("tms-1", Some(7), 2, 9, 11),
        record("tms-2", Some(8), 2, 13, 14),
        record("tms-3", None, 3, 9, 10),
    ]
}

#[rstest]
#[case(ExportFormat::Xlsx, &["timesheet_site.xlsx"])]
#[case(ExportFormat::Csv, &["timesheet_site.csv", "total_hours_site.csv"])]
fn export_writes_files(#[case] format: ExportFormat, #[case] expected: &[&str]) {
    let dir = TempDir::new().unwrap();
    let paths = ProjectPaths::new(dir.path(), "Acme", "site");
    let tz = FixedOffset::east_opt(0).unwrap();

    let summary = export_timesheet(&paths, format, &records(), &tz).unwrap();
    assert_eq!(summary.timesheet_rows, 3);
    assert_eq!(summary.day_rows, 2);

    let names: Vec<String> = summary
        .files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, expected);
    for file in &summary.files {
        assert!(file.starts_with(dir.path().join("Acme/site")));
        assert!(file.exists());
    }
}

fn cells(row: &[Data]) -> Vec<String> {
    row.iter()
        .map(|cell| match cell {
            Data::Empty => String::new(),
            other => other.to_string(),
        })
        .collect()
}

#[test]
fn workbook_sheets_headers_and_rows() {
    let dir = TempDir::new().unwrap();
    let paths = ProjectPaths::new(dir.path(), "Acme", "site");
    export_timesheet(&paths, ExportFormat::Xlsx, &records(), &Utc).unwrap();

    let mut workbook: Xlsx<_> = open_workbook(paths.timesheet_xlsx()).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["timesheet", "total_hours"]);

    let timesheet = workbook.worksheet_range("timesheet").unwrap();
    let rows: Vec<&[Data]> = timesheet.rows().collect();
    assert_eq!(rows.len(), 4);
    assert_eq!(
        cells(rows[0]),
        vec!["data", "hora_inicial", "hora_final", "tempo", "tempo_display", "issue", "titulo"]
    );
    assert_eq!(
        cells(rows[1]),
        vec!["02/03/26", "09:00", "11:00", "2:00:00", "2h", "7", "Issue 7"]
    );
    assert!(matches!(rows[1][5], Data::Float(n) if (n - 7.0).abs() < f64::EPSILON));
    assert_eq!(cells(rows[3])[5], "");
    assert_eq!(cells(rows[3])[6], "Task");

    let totals = workbook.worksheet_range("total_hours").unwrap();
    let rows: Vec<&[Data]> = totals.rows().collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(
        cells(rows[0]),
        vec!["data", "mês", "tempo", "tempo_display", "issues", "sprint"]
    );
    assert_eq!(
        cells(rows[1]),
        vec!["02/03/26", "3", "3:00:00", "3h", "7, 8", "1"]
    );
    assert!(matches!(rows[1][1], Data::Float(_)));
    assert!(matches!(rows[1][5], Data::Float(_)));
}

#[test]
fn csv_totals_group_by_day() {
    let dir = TempDir::new().unwrap();
    let paths = ProjectPaths::new(dir.path(), "Acme", "site");
    export_timesheet(&paths, ExportFormat::Csv, &records(), &Utc).unwrap();

    let totals = std::fs::read_to_string(paths.total_hours_csv()).unwrap();
    assert_eq!(
        totals,
        "data,mês,tempo,tempo_display,issues,sprint\n\
         02/03/26,3,3:00:00,3h,\"7, 8\",1\n\
         03/03/26,3,1:00:00,1h,,1\n"
    );
}

#[test]
fn export_is_regenerated_not_appended() {
    let dir = TempDir::new().unwrap();
    let paths = ProjectPaths::new(dir.path(), "Acme", "site");
    export_timesheet(&paths, ExportFormat::Csv, &records(), &Utc).unwrap();
    export_timesheet(&paths, ExportFormat::Csv, &records()[..1], &Utc).unwrap();

    let sheet = std::fs::read_to_string(paths.timesheet_csv()).unwrap();
    assert_eq!(sheet.lines().count(), 2);
}

fn issue() -> Issue {
    Issue {
        id: "iss-1".into(),
        number: 12,
        title: "Fix login".into(),
        description: Some("Users get logged out".into()),
        milestone_id: Some("mst-1".into()),
        sprint_id: "spr-1".into(),
        url: Some("https://gitlab.com/acme/site/-/issues/12".into()),
        status: Status::Closed,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn issue_note_and_changelog_land_in_project_folder() {
    let dir = TempDir::new().unwrap();
    let paths = ProjectPaths::new(dir.path(), "Acme", "site");
    let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let labels = vec!["bug".to_string(), "backend".to_string()];

    append_task_note(&paths.task_notes(), &issue(), &labels, is_bug(&labels), today).unwrap();
    let notes = read(&paths.task_notes());
    assert!(notes.contains("[ ] 12 - Fix login\n    bug,backend\n    02/03/26\n"));
    assert!(notes.ends_with("    _gadd 'bugfix: Fix login. close #12'; # gp\n"));

    let changelog = paths.changelog("v1.0");
    assert!(ensure_date_section(&changelog, "v1.0", today).unwrap());
    assert!(append_changelog_entry(&changelog, &issue()).unwrap());
    assert_eq!(read(&changelog), "## v1.0\n\n## 2026-03-02\n\n* Fix login. #12\n");
}
