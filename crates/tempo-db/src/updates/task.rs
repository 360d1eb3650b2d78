//! Task update builder.

use chrono::NaiveTime;
use serde::Serialize;
use tempo_core::entities::Estimate;

#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Option<NaiveTime>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Option<NaiveTime>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<Option<Estimate>>,
}

pub struct TaskUpdateBuilder(TaskUpdate);

impl TaskUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TaskUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn annotation(mut self, annotation: Option<String>) -> Self {
        self.0.annotation = Some(annotation);
        self
    }

    #[must_use]
    pub fn report(mut self, report: Option<String>) -> Self {
        self.0.report = Some(report);
        self
    }

    #[must_use]
    pub const fn start_time(mut self, start_time: Option<NaiveTime>) -> Self {
        self.0.start_time = Some(start_time);
        self
    }

    #[must_use]
    pub const fn end_time(mut self, end_time: Option<NaiveTime>) -> Self {
        self.0.end_time = Some(end_time);
        self
    }

    #[must_use]
    pub const fn estimate(mut self, estimate: Option<Estimate>) -> Self {
        self.0.estimate = Some(estimate);
        self
    }

    #[must_use]
    pub fn build(self) -> TaskUpdate {
        self.0
    }
}
