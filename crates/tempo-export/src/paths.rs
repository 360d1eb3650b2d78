//! File layout under the configured base folder.
//!
//! ```text
//! {base}/{customer}/{project}/tarefas.txt
//! {base}/{customer}/{project}/changelog/CHANGELOG_{milestone}.md
//! {base}/{customer}/{project}/timesheet_{project}.xlsx
//! ```

use std::path::{Path, PathBuf};

pub const TASK_NOTES_FILE: &str = "tarefas.txt";
pub const CHANGELOG_DIR: &str = "changelog";

/// Replace path separators so a name stays a single path component.
fn component(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}

/// Where one project's files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    root: PathBuf,
    project: String,
}

impl ProjectPaths {
    #[must_use]
    pub fn new(base: &Path, customer: &str, project: &str) -> Self {
        Self {
            root: base.join(component(customer)).join(component(project)),
            project: project.to_string(),
        }
    }

    /// Same file names, written into `dir` instead of the project folder.
    #[must_use]
    pub fn with_root(self, dir: impl Into<PathBuf>) -> Self {
        Self {
            root: dir.into(),
            ..self
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn task_notes(&self) -> PathBuf {
        self.root.join(TASK_NOTES_FILE)
    }

    #[must_use]
    pub fn changelog(&self, milestone: &str) -> PathBuf {
        self.root
            .join(CHANGELOG_DIR)
            .join(format!("CHANGELOG_{}.md", component(milestone)))
    }

    #[must_use]
    pub fn timesheet_xlsx(&self) -> PathBuf {
        self.root
            .join(format!("timesheet_{}.xlsx", component(&self.project)))
    }

    #[must_use]
    pub fn timesheet_csv(&self) -> PathBuf {
        self.root
            .join(format!("timesheet_{}.csv", component(&self.project)))
    }

    #[must_use]
    pub fn total_hours_csv(&self) -> PathBuf {
        self.root
            .join(format!("total_hours_{}.csv", component(&self.project)))
    }
}

/// Create the parent directory of `path` if needed.
pub(crate) fn ensure_parent(path: &Path) -> Result<(), crate::ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| crate::ExportError::io(parent, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn layout_under_base() {
        let paths = ProjectPaths::new(Path::new("/data"), "Acme", "site");
        assert_eq!(paths.root(), Path::new("/data/Acme/site"));
        assert_eq!(paths.task_notes(), PathBuf::from("/data/Acme/site/tarefas.txt"));
        assert_eq!(
            paths.changelog("v1.2"),
            PathBuf::from("/data/Acme/site/changelog/CHANGELOG_v1.2.md")
        );
        assert_eq!(
            paths.timesheet_xlsx(),
            PathBuf::from("/data/Acme/site/timesheet_site.xlsx")
        );
        assert_eq!(
            paths.total_hours_csv(),
            PathBuf::from("/data/Acme/site/total_hours_site.csv")
        );
    }

    #[test]
    fn separators_do_not_escape_the_base() {
        let paths = ProjectPaths::new(Path::new("/data"), "Acme/Inc", "a\\b");
        assert_eq!(paths.root(), Path::new("/data/Acme_Inc/a_b"));
        assert_eq!(
            paths.changelog("2026/Q1"),
            PathBuf::from("/data/Acme_Inc/a_b/changelog/CHANGELOG_2026_Q1.md")
        );
    }

    #[test]
    fn with_root_keeps_file_names() {
        let paths = ProjectPaths::new(Path::new("/data"), "Acme", "site").with_root("/tmp/out");
        assert_eq!(
            paths.timesheet_csv(),
            PathBuf::from("/tmp/out/timesheet_site.csv")
        );
    }
}
