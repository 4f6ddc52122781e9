//! Dependency manifest import (package.json shaped documents).
//!
//! Only `dependencies` and `devDependencies` are read; every other field is
//! ignored. Keys keep document order, and a key present in both maps keeps its
//! first position but takes the `devDependencies` version.

use super::classify::classify;
use super::types::{InstallStatus, StackItem};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

const DEPENDENCY_FIELDS: [&str; 2] = ["dependencies", "devDependencies"];

/// Manifest used by the "simulate local environment" action
pub const DEMO_MANIFEST: &str = r#"{
  "name": "night-city-netrunner-deck",
  "version": "2.0.77",
  "private": true,
  "dependencies": {
    "react": "^18.3.1",
    "react-dom": "^18.3.1",
    "framer-motion": "^11.0.8",
    "three": "^0.162.0",
    "express": "^4.18.2",
    "socket.io": "^4.7.4",
    "mongoose": "^8.2.0",
    "redis": "^4.6.13",
    "axios": "^1.6.7"
  },
  "devDependencies": {
    "typescript": "~5.4.2",
    "vite": "^5.1.5",
    "tailwindcss": "^3.4.1",
    "eslint": "^8.57.0"
  }
}"#;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text is not a JSON object, or a dependency field is not a mapping
    #[error("manifest is not valid JSON: {0}")]
    Syntax(String),

    /// The document parsed but declares no dependencies
    #[error("manifest declares no dependencies")]
    Empty,
}

/// Parses a manifest into fresh `Installed` stack items, one per dependency key.
pub fn parse_manifest(raw: &str) -> Result<Vec<StackItem>, ParseError> {
    let document: Value =
        serde_json::from_str(raw).map_err(|e| ParseError::Syntax(e.to_string()))?;

    let root = document
        .as_object()
        .ok_or_else(|| ParseError::Syntax("manifest root must be an object".to_string()))?;

    let merged = merge_dependency_maps(root)?;
    if merged.is_empty() {
        return Err(ParseError::Empty);
    }

    let items: Vec<StackItem> = merged
        .into_iter()
        .map(|(name, spec)| {
            let version = normalize_version(&version_text(&spec));
            let category = classify(&name);
            StackItem::new(name, version, category, InstallStatus::Installed)
        })
        .collect();

    debug!(count = items.len(), "Parsed manifest dependencies");
    Ok(items)
}

fn merge_dependency_maps(root: &Map<String, Value>) -> Result<Map<String, Value>, ParseError> {
    let mut merged = Map::new();

    for field in DEPENDENCY_FIELDS {
        match root.get(field) {
            None | Some(Value::Null) => {}
            Some(Value::Object(deps)) => {
                for (name, spec) in deps {
                    merged.insert(name.clone(), spec.clone());
                }
            }
            Some(other) => {
                return Err(ParseError::Syntax(format!(
                    "'{}' must be an object, found {}",
                    field,
                    json_kind(other)
                )));
            }
        }
    }

    Ok(merged)
}

fn version_text(spec: &Value) -> String {
    match spec {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Replaces a single leading `^` or `~` range marker with `v`.
pub fn normalize_version(spec: &str) -> String {
    match spec.strip_prefix(['^', '~']) {
        Some(rest) => format!("v{}", rest),
        None => spec.to_string(),
    }
}

/// Best-effort check for the built-in demo fixture. Only used to pick a log line.
pub fn looks_like_demo(raw: &str) -> bool {
    raw.contains("react") && raw.contains("socket.io")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::Category;

    #[test]
    fn test_parse_dependencies_and_dev_dependencies() {
        let raw = r#"{"dependencies": {"react": "^18.3.0"}, "devDependencies": {"mongodb": "~6.5.0"}}"#;
        let items = parse_manifest(raw).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "react");
        assert_eq!(items[0].version, "v18.3.0");
        assert_eq!(items[0].category, Category::Frontend);
        assert_eq!(items[0].status, InstallStatus::Installed);
        assert!(items[0].description.is_none());

        assert_eq!(items[1].name, "mongodb");
        assert_eq!(items[1].version, "v6.5.0");
        assert_eq!(items[1].category, Category::Database);
    }

    #[test]
    fn test_dev_dependencies_override_keeps_first_position() {
        let raw = r#"{
            "dependencies": {"express": "^4.0.0", "zod": "3.22.0"},
            "devDependencies": {"express": "~5.0.0", "vite": "^5.0.0"}
        }"#;
        let items = parse_manifest(raw).unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();

        assert_eq!(names, vec!["express", "zod", "vite"]);
        assert_eq!(items[0].version, "v5.0.0");
        assert_eq!(items[1].version, "3.22.0");
    }

    #[test]
    fn test_document_order_preserved() {
        let raw = r#"{"dependencies": {"zeta": "1", "alpha": "2", "mid": "3"}}"#;
        let names: Vec<String> = parse_manifest(raw)
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_empty_manifests() {
        assert_eq!(parse_manifest("{}"), Err(ParseError::Empty));
        assert_eq!(
            parse_manifest(r#"{"dependencies": {}}"#),
            Err(ParseError::Empty)
        );
        assert_eq!(
            parse_manifest(r#"{"name": "x", "dependencies": null}"#),
            Err(ParseError::Empty)
        );
    }

    #[test]
    fn test_malformed_manifests() {
        assert!(matches!(
            parse_manifest("not json"),
            Err(ParseError::Syntax(_))
        ));
        assert!(matches!(parse_manifest("[1, 2]"), Err(ParseError::Syntax(_))));
        assert!(matches!(
            parse_manifest(r#"{"dependencies": ["react"]}"#),
            Err(ParseError::Syntax(_))
        ));
    }

    #[test]
    fn test_non_string_versions_use_json_text() {
        let items = parse_manifest(r#"{"dependencies": {"legacy": 2, "flag": true}}"#).unwrap();
        assert_eq!(items[0].version, "2");
        assert_eq!(items[1].version, "true");
    }

    #[test]
    fn test_ids_are_unique_within_import() {
        let items = parse_manifest(DEMO_MANIFEST).unwrap();
        let mut ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn test_normalize_version() {
        assert_eq!(normalize_version("^18.3.0"), "v18.3.0");
        assert_eq!(normalize_version("~5.0.0"), "v5.0.0");
        assert_eq!(normalize_version("18.3.0"), "18.3.0");
        assert_eq!(normalize_version("^^1.0"), "v^1.0");
        assert_eq!(normalize_version(">=1.0 <2.0 || ^3.0"), ">=1.0 <2.0 || ^3.0");
        assert_eq!(normalize_version(""), "");
    }

    #[test]
    fn test_demo_detection() {
        assert!(looks_like_demo(DEMO_MANIFEST));
        assert!(!looks_like_demo(r#"{"dependencies": {"react": "^18"}}"#));
    }

    #[test]
    fn test_demo_manifest_parses() {
        let items = parse_manifest(DEMO_MANIFEST).unwrap();
        assert_eq!(items.len(), 13);
        assert!(items
            .iter()
            .all(|i| i.status == InstallStatus::Installed && !i.version.starts_with('^')));
    }
}
