//! Append-only calculation history
//!
//! One entry per successful `=`, oldest first. Entries are never edited; the
//! only removal is [`History::clear`].

use serde::{Deserialize, Serialize};

/// A single evaluated expression and the result text it produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The expression that was evaluated
    pub input: String,
    /// The formatted result
    pub result: String,
}

impl HistoryEntry {
    /// Creates a new history entry
    #[must_use]
    pub fn new(input: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            result: result.into(),
        }
    }

    /// Returns the entry as `input = result`
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} = {}", self.input, self.result)
    }
}

/// Ordered history log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Creates an empty history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an evaluated expression and its result
    pub fn record(&mut self, input: &str, result: &str) {
        self.entries.push(HistoryEntry::new(input, result));
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the entries in insertion order
    #[must_use]
    pub fn as_slice(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Returns an iterator over the entries (oldest first)
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// One `input = result` line per entry, oldest first
    #[must_use]
    pub fn export_formatted(&self) -> String {
        self.iter()
            .map(HistoryEntry::display)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
