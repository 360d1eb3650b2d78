//! Customer update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

pub struct CustomerUpdateBuilder(CustomerUpdate);

impl CustomerUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(CustomerUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn active(mut self, active: bool) -> Self {
        self.0.active = Some(active);
        self
    }

    #[must_use]
    pub fn build(self) -> CustomerUpdate {
        self.0
    }
}
