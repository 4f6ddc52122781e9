//! Stack item model shared by the parser, the store and the analysis pipeline.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

crate::define_label_enum! {
    /// Broad bucket a technology is filed under
    Category {
        Frontend => "Frontend" : "Frontend",
        Backend => "Backend" : "Backend",
        Database => "Database" : "Database",
        Runtime => "Runtime" : "Runtime",
    }
}

crate::define_label_enum! {
    /// Install state shown on a stack card
    InstallStatus {
        Installed => "INSTALLED" : "Installed",
        Missing => "MISSING" : "Missing",
        Corrupted => "CORRUPTED" : "Corrupted",
        Pending => "PENDING" : "Pending",
    }
}

/// One tracked technology
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackItem {
    /// Opaque unique token, never reused
    pub id: String,
    pub name: String,
    pub category: Category,
    pub version: String,
    pub status: InstallStatus,
    /// Flavor text from the last completed analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl StackItem {
    /// Creates an item with a freshly generated id and no description
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        category: Category,
        status: InstallStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            category,
            version: version.into(),
            status,
            description: None,
        }
    }

    pub fn is_installed(&self) -> bool {
        self.status == InstallStatus::Installed
    }
}

/// Fields supplied by the user when adding an item by hand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub version: String,
    pub category: Category,
    pub status: InstallStatus,
}

impl NewItem {
    pub fn into_item(self) -> StackItem {
        StackItem::new(self.name, self.version, self.category, self.status)
    }
}

/// Partial update applied by a manual edit; `None` leaves the field as is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub version: Option<String>,
    pub category: Option<Category>,
    pub status: Option<InstallStatus>,
}

impl ItemPatch {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_status(mut self, status: InstallStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.version.is_none()
            && self.category.is_none()
            && self.status.is_none()
    }

    pub(crate) fn apply(self, item: &mut StackItem) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(version) = self.version {
            item.version = version;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(status) = self.status {
            item.status = status;
        }
    }
}
