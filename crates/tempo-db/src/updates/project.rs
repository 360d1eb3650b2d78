//! Project update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gitlab_project_id: Option<Option<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

pub struct ProjectUpdateBuilder(ProjectUpdate);

impl ProjectUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ProjectUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.0.customer_id = Some(customer_id.into());
        self
    }

    #[must_use]
    pub const fn gitlab_project_id(mut self, gitlab_project_id: Option<u64>) -> Self {
        self.0.gitlab_project_id = Some(gitlab_project_id);
        self
    }

    #[must_use]
    pub const fn active(mut self, active: bool) -> Self {
        self.0.active = Some(active);
        self
    }

    #[must_use]
    pub fn build(self) -> ProjectUpdate {
        self.0
    }
}
