//! # Undo/Redo History
//!
//! A bounded, linear list of snapshot pairs with a cursor.
//!
//! ## Design
//!
//! - Each entry stores value copies of the layout before and after an action
//! - `position` counts the entries currently applied; entries at or beyond
//!   it form the redo branch
//! - Recording a new entry discards the redo branch
//! - When the list grows past `max_size` the oldest entry is evicted
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new();
//! history.record(entry);
//!
//! if let Some(snapshot) = history.undo() {
//!     layout = snapshot.into_layout();
//! }
//! ```

use chrono::{DateTime, Utc};
use formsmith_layout::{Layout, Section};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Category of a recorded action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HistoryKind {
    AddSection,
    RemoveSection,
    RenameSection,
    ToggleSection,
    AddField,
    RemoveField,
    RenameField,
    UpdateField,
    DuplicateField,
    MoveField,
    MoveSection,
    /// Several mutations recorded as one step (bulk actions)
    Batch,
}

/// Immutable value copy of the section tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    sections: Vec<Section>,
}

impl Snapshot {
    pub fn capture(layout: &Layout) -> Self {
        Self {
            sections: layout.sections.clone(),
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn into_layout(self) -> Layout {
        Layout {
            sections: self.sections,
        }
    }
}

/// One undoable step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    pub description: String,
    pub before: Snapshot,
    pub after: Snapshot,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(
        kind: HistoryKind,
        description: impl Into<String>,
        before: Snapshot,
        after: Snapshot,
    ) -> Self {
        Self {
            kind,
            description: description.into(),
            before,
            after,
            recorded_at: Utc::now(),
        }
    }
}

/// Snapshot history for one builder instance
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,

    /// Number of entries currently applied
    position: usize,

    /// Maximum number of entries kept (0 = unlimited)
    max_size: usize,
}

impl History {
    /// Create a history with the default limit (50)
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            position: 0,
            max_size,
        }
    }

    /// Record a new action, discarding any redo branch
    pub fn record(&mut self, entry: HistoryEntry) {
        if self.position < self.entries.len() {
            let dropped = self.entries.len() - self.position;
            self.entries.truncate(self.position);
            tracing::debug!("history: discarded {} redo entries", dropped);
        }

        self.entries.push_back(entry);
        self.position = self.entries.len();

        if self.max_size > 0 && self.entries.len() > self.max_size {
            if let Some(evicted) = self.entries.pop_front() {
                tracing::debug!("history: evicted oldest entry \"{}\"", evicted.description);
            }
            self.position -= 1;
        }
    }

    /// Step back one entry, returning the snapshot to restore
    pub fn undo(&mut self) -> Option<Snapshot> {
        if self.position == 0 {
            tracing::debug!("history: nothing to undo");
            return None;
        }

        self.position -= 1;
        self.entries.get(self.position).map(|e| e.before.clone())
    }

    /// Step forward one entry, returning the snapshot to restore
    pub fn redo(&mut self) -> Option<Snapshot> {
        let entry = self.entries.get(self.position);
        if entry.is_none() {
            tracing::debug!("history: nothing to redo");
        }

        let snapshot = entry.map(|e| e.after.clone())?;
        self.position += 1;
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    pub fn can_redo(&self) -> bool {
        self.position < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Entry the next undo would revert
    pub fn undo_entry(&self) -> Option<&HistoryEntry> {
        self.position
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
    }

    /// Entry the next redo would reapply
    pub fn redo_entry(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.position)
    }

    /// Get description of the next undo step
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_entry().map(|e| e.description.as_str())
    }

    /// Get description of the next redo step
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_entry().map(|e| e.description.as_str())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.position = 0;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
