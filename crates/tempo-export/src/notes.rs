//! The plain-text task notes file (`tarefas.txt`).

use std::io::Write as _;
use std::path::Path;

use chrono::NaiveDate;
use tempo_core::entities::Issue;
use tempo_core::hours::DATE_FORMAT;

use crate::error::ExportError;
use crate::paths::ensure_parent;

/// Label that turns the commit hint into a `bugfix:` message.
pub const BUG_LABEL: &str = "bug";

/// Whether the labels mark the issue as a bug.
#[must_use]
pub fn is_bug<S: AsRef<str>>(labels: &[S]) -> bool {
    labels.iter().any(|l| l.as_ref() == BUG_LABEL)
}

/// Render the note block appended for a new issue.
#[must_use]
pub fn render_task_note<S: AsRef<str>>(
    issue: &Issue,
    labels: &[S],
    is_bug: bool,
    today: NaiveDate,
) -> String {
    let labels = labels
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",");

    let mut note = format!(
        "\n---\n\n[ ] {} - {}\n    {labels}\n    {}\n\n\n",
        issue.number,
        issue.title,
        today.format(DATE_FORMAT),
    );
    if let Some(description) = issue.description.as_deref().filter(|d| !d.is_empty()) {
        note.push_str(&format!("    {description}\n\n"));
    }
    let title = if is_bug {
        format!("bugfix: {}", issue.title)
    } else {
        issue.title.clone()
    };
    note.push_str(&format!("    _gadd '{title}. close #{}'; # gp\n", issue.number));
    note
}

/// Append the note block for `issue` to the notes file, creating it if needed.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file or its folder cannot be written.
pub fn append_task_note<S: AsRef<str>>(
    path: &Path,
    issue: &Issue,
    labels: &[S],
    is_bug: bool,
    today: NaiveDate,
) -> Result<(), ExportError> {
    ensure_parent(path)?;
    let note = render_task_note(issue, labels, is_bug, today);
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ExportError::io(path, e))?;
    file.write_all(note.as_bytes())
        .map_err(|e| ExportError::io(path, e))?;
    tracing::debug!(path = %path.display(), number = issue.number, "task note appended");
    Ok(())
}
