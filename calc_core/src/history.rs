//! # Calculation History
//!
//! Append-only record of successful evaluations, newest first, bounded to
//! the [`MAX_ENTRIES`] most recent.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::history::{History, HistorySink};
//!
//! let mut history = History::new();
//! history.record("2+2", "4");
//! history.record("3×3", "9");
//!
//! assert_eq!(history.len(), 2);
//! assert_eq!(history.entries()[0].expression, "3×3");
//! ```

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of entries kept
pub const MAX_ENTRIES: usize = 50;

/// Receives `(expression, result)` pairs from the calculator.
pub trait HistorySink {
    /// Record one successful evaluation
    fn record(&mut self, expression: &str, result: &str);
}

/// One successful evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique identifier
    pub id: Uuid,
    /// Expression text as it was on the display
    pub expression: String,
    /// Display text of the result
    pub result: String,
    /// When the entry was recorded
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        HistoryEntry {
            id: Uuid::new_v4(),
            expression: expression.into(),
            result: result.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Bounded, newest-first history list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries, newest first
    pub fn entries(&self) -> &VecDeque<HistoryEntry> {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        tracing::debug!(count = self.entries.len(), "clearing history");
        self.entries.clear();
    }
}

impl HistorySink for History {
    fn record(&mut self, expression: &str, result: &str) {
        self.entries.push_front(HistoryEntry::new(expression, result));
        self.entries.truncate(MAX_ENTRIES);
    }
}
