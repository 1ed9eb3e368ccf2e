// Event log domain model - bounded, newest-first record of fleet activity
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// The dashboard only ever renders the most recent entries; everything
/// older is evicted.
pub const LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Boarding,
    Disembarking,
    WrongBus,
    System,
    Maintenance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLogEntry {
    pub id: String,
    pub timestamp: String,
    pub kind: EventKind,
    pub message: String,
    pub severity: Severity,
}

impl EventLogEntry {
    pub fn new(
        id: String,
        timestamp: String,
        kind: EventKind,
        message: String,
        severity: Severity,
    ) -> Self {
        Self {
            id,
            timestamp,
            kind,
            message,
            severity,
        }
    }
}

/// Local wall-clock time in the `HH:MM:SS` form the dashboard renders.
pub fn wall_clock_time() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Bounded append-only log, newest first. Entries are never mutated;
/// insertion beyond capacity evicts from the tail.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: VecDeque<EventLogEntry>,
}

impl EventLog {
    pub fn push(&mut self, entry: EventLogEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(LOG_CAPACITY);
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventLogEntry> {
        self.entries.iter()
    }

    pub fn newest(&self) -> Option<&EventLogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count backing the "unread alerts" badge: everything above info.
    pub fn alert_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.severity != Severity::Info)
            .count()
    }
}
