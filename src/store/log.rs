//! Bounded operator log shown next to the stack.
//!
//! Every append is mirrored to `tracing` so the same events reach the
//! diagnostic stream.

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use tracing::{error, info, warn};

/// Most recent entries kept in the ring
pub const LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Info,
    Error,
    Warning,
    System,
}

impl LogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::Info => "info",
            LogKind::Error => "error",
            LogKind::Warning => "warning",
            LogKind::System => "system",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Creation time in epoch milliseconds, strictly increasing within a ring
    pub id: i64,
    /// Local wall clock, `HH:MM:SS`
    pub timestamp: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: LogKind,
}

#[derive(Debug, Clone)]
pub struct LogRing {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    last_id: i64,
}

impl LogRing {
    pub fn new() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            last_id: 0,
        }
    }

    /// Appends an entry, dropping the oldest one when the ring is full.
    pub fn push(&mut self, message: impl Into<String>, kind: LogKind) -> &LogEntry {
        let message = message.into();
        mirror(&message, kind);

        let id = Utc::now().timestamp_millis().max(self.last_id + 1);
        self.last_id = id;

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            id,
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            message,
            kind,
        });

        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Snapshot in append order, oldest first
    pub fn to_vec(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn count_of(&self, kind: LogKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}

impl Default for LogRing {
    fn default() -> Self {
        Self::new()
    }
}

fn mirror(message: &str, kind: LogKind) {
    match kind {
        LogKind::Error => error!(kind = %kind, "{}", message),
        LogKind::Warning => warn!(kind = %kind, "{}", message),
        LogKind::Info | LogKind::System => info!(kind = %kind, "{}", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_keeps_most_recent() {
        let mut ring = LogRing::new();
        for i in 0..60 {
            ring.push(format!("entry {}", i), LogKind::Info);
        }

        assert_eq!(ring.len(), LOG_CAPACITY);
        let messages: Vec<_> = ring.entries().map(|e| e.message.clone()).collect();
        let expected: Vec<_> = (10..60).map(|i| format!("entry {}", i)).collect();
        assert_eq!(messages, expected);
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut ring = LogRing::new();
        for _ in 0..20 {
            ring.push("tick", LogKind::System);
        }

        let ids: Vec<_> = ring.entries().map(|e| e.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_timestamp_format() {
        let mut ring = LogRing::new();
        let entry = ring.push("hello", LogKind::Warning);

        assert_eq!(entry.timestamp.len(), 8);
        assert_eq!(entry.timestamp.as_bytes()[2], b':');
        assert_eq!(entry.timestamp.as_bytes()[5], b':');
        assert_eq!(entry.kind, LogKind::Warning);
    }

    #[test]
    fn test_count_of() {
        let mut ring = LogRing::with_capacity(3);
        ring.push("a", LogKind::Error);
        ring.push("b", LogKind::Info);
        ring.push("c", LogKind::Error);
        ring.push("d", LogKind::Info);

        assert_eq!(ring.len(), 3);
        assert_eq!(ring.count_of(LogKind::Error), 1);
        assert_eq!(ring.last().map(|e| e.message.as_str()), Some("d"));
    }

    #[test]
    fn test_entry_wire_shape() {
        let mut ring = LogRing::new();
        ring.push("Manifest Loaded Successfully.", LogKind::System);

        let json = serde_json::to_value(&ring.to_vec()[0]).unwrap();
        assert_eq!(json["type"], "system");
        assert_eq!(json["message"], "Manifest Loaded Successfully.");
        assert!(json["id"].is_i64());
    }
}
