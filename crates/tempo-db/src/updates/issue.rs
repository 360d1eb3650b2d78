//! Issue update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Option<String>>,
}

impl IssueUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.milestone_id.is_none()
            && self.sprint_id.is_none()
            && self.url.is_none()
    }
}

pub struct IssueUpdateBuilder(IssueUpdate);

impl IssueUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(IssueUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub fn milestone_id(mut self, milestone_id: Option<String>) -> Self {
        self.0.milestone_id = Some(milestone_id);
        self
    }

    #[must_use]
    pub fn sprint_id(mut self, sprint_id: impl Into<String>) -> Self {
        self.0.sprint_id = Some(sprint_id.into());
        self
    }

    #[must_use]
    pub fn url(mut self, url: Option<String>) -> Self {
        self.0.url = Some(url);
        self
    }

    #[must_use]
    pub fn build(self) -> IssueUpdate {
        self.0
    }
}
