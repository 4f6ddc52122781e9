//! Async driver around [`StackStore`] and [`Analyzer`].
//!
//! The store lock is only taken for the synchronous begin and complete
//! transitions and is never held while the remote call is pending, so reads
//! stay responsive during an analysis.

use crate::analysis::{AnalysisResult, Analyzer};
use crate::locale::Locale;
use crate::stack::{ParseError, StackItem};
use crate::store::{LogEntry, StackStore, StackSummary};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

pub struct Session {
    store: Mutex<StackStore>,
    analyzer: Analyzer,
}

impl Session {
    pub fn new(store: StackStore, analyzer: Analyzer) -> Self {
        Self {
            store: Mutex::new(store),
            analyzer,
        }
    }

    fn store(&self) -> MutexGuard<'_, StackStore> {
        // A poisoned lock still holds a consistent store: every transition
        // finishes before the guard drops.
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Runs one analysis through the gate.
    ///
    /// Returns `None` when the gate is held by another analysis or the item
    /// does not exist. The request is dropped, not queued.
    pub async fn analyze_item(&self, id: &str) -> Option<AnalysisResult> {
        let ticket = self.store().begin_analysis(id)?;

        let result = self.analyzer.analyze(ticket.item(), ticket.locale()).await;

        self.store().complete_analysis(ticket, result.clone());
        Some(result)
    }

    /// Analyzes every item in list order, one at a time.
    ///
    /// Items skipped by the gate are left out of the returned list.
    pub async fn analyze_all(&self) -> Vec<(StackItem, AnalysisResult)> {
        let ids: Vec<String> = self.store().items().iter().map(|i| i.id.clone()).collect();
        info!(items = ids.len(), "Analyzing full stack");

        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            match self.analyze_item(&id).await {
                Some(result) => {
                    if let Some(item) = self.store().item(&id).cloned() {
                        results.push((item, result));
                    }
                }
                None => debug!(item = %id, "Analysis skipped"),
            }
        }
        results
    }

    pub fn import_manifest(&self, raw: &str) -> Result<usize, ParseError> {
        self.store().import_manifest(raw)
    }

    pub fn set_locale(&self, locale: Locale) {
        self.store().set_locale(locale);
    }

    pub fn locale(&self) -> Locale {
        self.store().locale()
    }

    /// Copy of the current item list
    pub fn snapshot(&self) -> Vec<StackItem> {
        self.store().items().to_vec()
    }

    pub fn logs(&self) -> Vec<LogEntry> {
        self.store().logs().to_vec()
    }

    pub fn summary(&self) -> StackSummary {
        self.store().summary()
    }

    pub fn is_analyzing(&self) -> bool {
        self.store().is_analyzing()
    }

    /// Runs `f` against the store under the lock.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut StackStore) -> R) -> R {
        f(&mut self.store())
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }
}
