//! Per-milestone markdown changelogs.
//!
//! A changelog starts with `## {milestone}` and gets one `## YYYY-MM-DD`
//! section per day something was written, each followed by `* title. #n` lines.

use std::io::Write as _;
use std::path::Path;

use chrono::NaiveDate;
use tempo_core::entities::Issue;
use tempo_core::hours::CHANGELOG_DATE_FORMAT;

use crate::error::ExportError;
use crate::paths::ensure_parent;

/// The changelog line for an issue, newline included.
#[must_use]
pub fn changelog_entry(issue: &Issue) -> String {
    format!("* {}. #{}\n", issue.title, issue.number)
}

fn read(path: &Path) -> Result<String, ExportError> {
    std::fs::read_to_string(path).map_err(|e| ExportError::io(path, e))
}

fn append(path: &Path, text: &str) -> Result<(), ExportError> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ExportError::io(path, e))?;
    file.write_all(text.as_bytes())
        .map_err(|e| ExportError::io(path, e))
}

/// Make sure the changelog exists and has a section for `today`.
///
/// A missing file is created with the `## {milestone}` heading. Returns
/// whether the date section was added.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be read or written.
pub fn ensure_date_section(
    path: &Path,
    milestone: &str,
    today: NaiveDate,
) -> Result<bool, ExportError> {
    if !path.exists() {
        ensure_parent(path)?;
        std::fs::write(path, format!("## {milestone}\n")).map_err(|e| ExportError::io(path, e))?;
        tracing::debug!(path = %path.display(), "changelog created");
    }

    let date = today.format(CHANGELOG_DATE_FORMAT).to_string();
    if read(path)?.contains(&date) {
        return Ok(false);
    }
    append(path, &format!("\n## {date}\n\n"))?;
    tracing::debug!(path = %path.display(), %date, "changelog date section added");
    Ok(true)
}

/// Append the issue's entry unless the same line is already present.
///
/// Returns whether the entry was written.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be read or written.
pub fn append_changelog_entry(path: &Path, issue: &Issue) -> Result<bool, ExportError> {
    let entry = changelog_entry(issue);
    let existing = if path.exists() {
        read(path)?
    } else {
        ensure_parent(path)?;
        String::new()
    };
    if existing.contains(&entry) {
        return Ok(false);
    }
    append(path, &entry)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use tempo_core::enums::Status;

    use super::*;

    fn issue(number: u64, title: &str) -> Issue {
        Issue {
            id: format!("iss-{number}"),
            number,
            title: title.into(),
            description: None,
            milestone_id: Some("mst-1".into()),
            sprint_id: "spr-1".into(),
            url: None,
            status: Status::Closed,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn creates_file_with_heading_and_date() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("changelog/CHANGELOG_v1.2.md");

        assert!(ensure_date_section(&path, "v1.2", day(2)).unwrap());
        assert!(!ensure_date_section(&path, "v1.2", day(2)).unwrap());
        assert!(append_changelog_entry(&path, &issue(7, "Export timesheet")).unwrap());

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "## v1.2\n\n## 2026-03-02\n\n* Export timesheet. #7\n"
        );
    }

    #[test]
    fn duplicate_entry_is_skipped() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("CHANGELOG_v1.md");
        ensure_date_section(&path, "v1", day(2)).unwrap();

        assert!(append_changelog_entry(&path, &issue(7, "Export")).unwrap());
        assert!(!append_changelog_entry(&path, &issue(7, "Export")).unwrap());
        assert!(append_changelog_entry(&path, &issue(8, "Export")).unwrap());

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("* Export. #7").count(), 1);
    }

    #[test]
    fn new_day_gets_new_section() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("CHANGELOG_v1.md");
        ensure_date_section(&path, "v1", day(2)).unwrap();
        append_changelog_entry(&path, &issue(1, "One")).unwrap();
        assert!(ensure_date_section(&path, "v1", day(3)).unwrap());
        append_changelog_entry(&path, &issue(2, "Two")).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "## v1\n\n## 2026-03-02\n\n* One. #1\n\n## 2026-03-03\n\n* Two. #2\n"
        );
    }
}
