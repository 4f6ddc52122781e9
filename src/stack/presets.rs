//! Known technologies used to prefill manual entries, and the boot stack.

use super::classify::classify;
use super::types::{Category, InstallStatus, NewItem, StackItem};

/// Suggested metadata for a well-known technology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub category: Category,
    pub version: &'static str,
}

/// Version label used when a manually added name has no preset
pub const UNKNOWN_VERSION: &str = "unknown";

const PRESETS: &[Preset] = &[
    Preset { name: "Node.js", category: Category::Runtime, version: "v20.11.0" },
    Preset { name: "React", category: Category::Frontend, version: "v18.3.1" },
    Preset { name: "Vue", category: Category::Frontend, version: "v3.4.21" },
    Preset { name: "TypeScript", category: Category::Frontend, version: "v5.4.2" },
    Preset { name: "Express", category: Category::Backend, version: "v4.18.2" },
    Preset { name: "Docker", category: Category::Runtime, version: "v24.0.0" },
    Preset { name: "MongoDB", category: Category::Database, version: "v7.0.5" },
    Preset { name: "MySQL", category: Category::Database, version: "v8.3.0" },
    Preset { name: "Redis", category: Category::Database, version: "v7.2.4" },
    Preset { name: "Python", category: Category::Runtime, version: "v3.12.2" },
];

/// Items shown before the user imports anything: Node.js, React, Express, Docker
const BOOT_STACK: [&str; 4] = ["Node.js", "React", "Express", "Docker"];

/// Whether two component names are the same after trimming and Unicode
/// lowercasing. Every name lookup folds case this way, as does the classifier.
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Finds a preset by exact name, ignoring case.
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| names_match(p.name, name))
}

/// Builds an `Installed` entry for a typed name, using the preset when one exists
/// and the keyword classifier otherwise.
pub fn draft_item(name: &str) -> NewItem {
    match find_preset(name) {
        Some(preset) => NewItem {
            name: preset.name.to_string(),
            version: preset.version.to_string(),
            category: preset.category,
            status: InstallStatus::Installed,
        },
        None => NewItem {
            name: name.trim().to_string(),
            version: UNKNOWN_VERSION.to_string(),
            category: classify(name),
            status: InstallStatus::Installed,
        },
    }
}

pub fn boot_stack() -> Vec<StackItem> {
    BOOT_STACK
        .iter()
        .filter_map(|name| find_preset(name))
        .map(|p| StackItem::new(p.name, p.version, p.category, InstallStatus::Installed))
        .collect()
}
