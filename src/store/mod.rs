//! The stack state container.
//!
//! [`StackStore`] owns the item list, the operator log and the analysis gate.
//! All mutation goes through its methods, each of which is one complete state
//! transition: an import swaps the whole list at once, edits patch a single
//! item, and log lines are only ever appended.

pub mod log;

use crate::analysis::AnalysisResult;
use crate::locale::{Catalog, Locale};
use crate::stack::{
    self, boot_stack, names_match, Category, InstallStatus, ItemPatch, NewItem, ParseError,
    StackItem,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

pub use log::{LogEntry, LogKind, LogRing, LOG_CAPACITY};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no stack item with id '{0}'")]
    UnknownItem(String),
}

/// Proof that the analysis gate was acquired for one item.
///
/// Only [`StackStore::begin_analysis`] hands these out, and
/// [`StackStore::complete_analysis`] consumes it, so a ticket completes at
/// most once.
#[derive(Debug)]
pub struct AnalysisTicket {
    item: StackItem,
    locale: Locale,
}

impl AnalysisTicket {
    /// The item as it was when the analysis started
    pub fn item(&self) -> &StackItem {
        &self.item
    }

    pub fn item_id(&self) -> &str {
        &self.item.id
    }

    /// Locale the analysis was requested in
    pub fn locale(&self) -> Locale {
        self.locale
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StackSummary {
    pub total: usize,
    pub installed: usize,
    /// 100 for any non-empty stack, 0 otherwise
    pub integrity: u8,
}

#[derive(Debug, Clone)]
pub struct StackStore {
    items: Vec<StackItem>,
    logs: LogRing,
    locale: Locale,
    analyzing: Option<String>,
}

impl StackStore {
    pub fn new(locale: Locale) -> Self {
        Self::with_items(Vec::new(), locale)
    }

    pub fn with_items(items: Vec<StackItem>, locale: Locale) -> Self {
        Self {
            items,
            logs: LogRing::new(),
            locale,
            analyzing: None,
        }
    }

    /// Store holding the built-in stack, with the startup log lines written.
    pub fn boot(locale: Locale) -> Self {
        let mut store = Self::with_items(boot_stack(), locale);
        store.log(store.catalog().log_init, LogKind::System);
        store.log(store.catalog().log_ready, LogKind::Info);
        store
    }

    fn catalog(&self) -> &'static Catalog {
        self.locale.catalog()
    }

    fn log(&mut self, message: impl Into<String>, kind: LogKind) {
        self.logs.push(message, kind);
    }

    fn position(&self, id: &str) -> Result<usize, StoreError> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| StoreError::UnknownItem(id.to_string()))
    }

    /// Replaces the whole stack with the manifest's dependencies.
    ///
    /// On error the stack is left exactly as it was and one log line
    /// describes the failure. Returns the number of imported items.
    pub fn import_manifest(&mut self, raw: &str) -> Result<usize, ParseError> {
        match stack::parse_manifest(raw) {
            Ok(items) => {
                let loaded = if stack::looks_like_demo(raw) {
                    self.catalog().log_demo_loaded
                } else {
                    self.catalog().log_manifest_loaded
                };
                self.log(loaded, LogKind::System);

                let count = items.len();
                self.items = items;
                self.log(
                    format!("{} {}", self.catalog().log_deps_detected, count),
                    LogKind::Info,
                );
                Ok(count)
            }
            Err(ParseError::Empty) => {
                self.log(self.catalog().log_empty_manifest, LogKind::Warning);
                Err(ParseError::Empty)
            }
            Err(err) => {
                debug!(error = %err, "Manifest rejected");
                self.log(self.catalog().log_parse_error, LogKind::Error);
                Err(err)
            }
        }
    }

    /// Appends a hand-entered item and returns its id.
    pub fn add_item(&mut self, draft: NewItem) -> String {
        let item = draft.into_item();
        let id = item.id.clone();
        self.log(
            format!("{}: {}", self.catalog().log_item_added, item.name),
            LogKind::Info,
        );
        self.items.push(item);
        id
    }

    pub fn edit_item(&mut self, id: &str, patch: ItemPatch) -> Result<(), StoreError> {
        let index = self.position(id)?;
        if patch.is_empty() {
            return Ok(());
        }

        let item = &mut self.items[index];
        patch.apply(item);
        let message = format!("{}: {}", self.catalog().log_item_updated, self.items[index].name);
        self.log(message, LogKind::Info);
        Ok(())
    }

    pub fn delete_item(&mut self, id: &str) -> Result<StackItem, StoreError> {
        let index = self.position(id)?;
        let removed = self.items.remove(index);
        self.log(
            format!("{}: {}", self.catalog().log_item_removed, removed.name),
            LogKind::Warning,
        );
        Ok(removed)
    }

    /// Flips `Installed` to `Missing` and anything else to `Installed`.
    ///
    /// The old description no longer matches the status, so it is dropped.
    pub fn toggle_status(&mut self, id: &str) -> Result<InstallStatus, StoreError> {
        let index = self.position(id)?;
        let item = &mut self.items[index];
        item.status = match item.status {
            InstallStatus::Installed => InstallStatus::Missing,
            _ => InstallStatus::Installed,
        };
        item.description = None;

        let status = item.status;
        let message = format!(
            "{}: {} -> {}",
            self.catalog().log_status_toggled,
            self.items[index].name,
            self.catalog().status_label(status)
        );
        self.log(message, LogKind::System);
        Ok(status)
    }

    /// Acquires the global analysis gate for `id`.
    ///
    /// Returns `None` without touching state when any analysis is already in
    /// flight or the item does not exist.
    pub fn begin_analysis(&mut self, id: &str) -> Option<AnalysisTicket> {
        if let Some(current) = &self.analyzing {
            debug!(requested = id, in_flight = %current, "Analysis already in flight, ignoring request");
            return None;
        }

        let item = self.item(id)?.clone();
        self.analyzing = Some(item.id.clone());
        self.log(
            format!("{}: {}...", self.catalog().log_start_scan, item.name),
            LogKind::System,
        );

        Some(AnalysisTicket {
            item,
            locale: self.locale,
        })
    }

    /// Writes the result back and releases the gate.
    ///
    /// Log lines use the ticket's locale and the item name captured when the
    /// analysis began. If the item was deleted meanwhile, only the logs are
    /// written.
    pub fn complete_analysis(&mut self, ticket: AnalysisTicket, result: AnalysisResult) {
        let catalog = ticket.locale.catalog();

        match self.items.iter_mut().find(|item| item.id == ticket.item.id) {
            Some(item) => item.description = Some(result.text),
            None => warn!(item = %ticket.item.id, "Analyzed item no longer exists, dropping result"),
        }

        if result.is_offline {
            self.log(catalog.log_offline_fallback, LogKind::Warning);
        }
        self.log(
            format!("{} {}", ticket.item.name, catalog.log_scan_complete),
            LogKind::Info,
        );

        if self.analyzing.as_deref() == Some(ticket.item.id.as_str()) {
            self.analyzing = None;
        }
    }

    /// Switches the language used for subsequent log lines.
    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
        self.log(
            format!("{}: {}", self.catalog().log_lang_change, locale.as_tag()),
            LogKind::System,
        );
    }

    pub fn items(&self) -> &[StackItem] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&StackItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// First item named `name`, ignoring case
    pub fn find_by_name(&self, name: &str) -> Option<&StackItem> {
        self.items.iter().find(|item| names_match(&item.name, name))
    }

    pub fn logs(&self) -> &LogRing {
        &self.logs
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing.is_some()
    }

    pub fn analyzing_id(&self) -> Option<&str> {
        self.analyzing.as_deref()
    }

    /// Items in `category`, or everything for `None`
    pub fn filtered(&self, category: Option<Category>) -> Vec<&StackItem> {
        self.items
            .iter()
            .filter(|item| category.map_or(true, |c| item.category == c))
            .collect()
    }

    pub fn summary(&self) -> StackSummary {
        let total = self.items.len();
        StackSummary {
            total,
            installed: self.items.iter().filter(|i| i.is_installed()).count(),
            integrity: if total > 0 { 100 } else { 0 },
        }
    }
}

impl Default for StackStore {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}
