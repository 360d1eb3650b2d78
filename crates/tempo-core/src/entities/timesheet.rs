use chrono::{DateTime, Duration, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A start/end interval logging work on a task. `end_time` is `None` while
/// the timer is running.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Timesheet {
    pub id: String,
    pub task_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Timesheet {
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.end_time.is_none()
    }

    /// Worked time. Zero while running.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end_time
            .map_or_else(Duration::zero, |end| end - self.start_time)
    }
}
