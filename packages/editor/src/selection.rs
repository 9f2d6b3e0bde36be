//! Bulk-mode multi-select over fields.

use formsmith_layout::Layout;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct BulkSelection {
    active: bool,
    selected: BTreeSet<String>,
}

impl BulkSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self) {
        self.active = true;
    }

    /// Leave bulk mode, dropping the selection
    pub fn exit(&mut self) {
        self.active = false;
        self.selected.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Add or remove `id`. Toggling outside bulk mode enters it.
    /// Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        self.active = true;
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        }
    }

    /// Replace the selection with `ids`
    pub fn select_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.active = true;
        self.selected = ids.into_iter().collect();
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// Take the selected ids in layout display order, clearing the set.
    /// Ids no longer present in the layout are dropped.
    pub fn take_ordered(&mut self, layout: &Layout) -> Vec<String> {
        let selected = std::mem::take(&mut self.selected);
        layout
            .field_ids()
            .into_iter()
            .filter(|id| selected.contains(id))
            .collect()
    }

    /// Forget ids that no longer exist (after undo/redo or deletes)
    pub fn retain_existing(&mut self, layout: &Layout) {
        self.selected.retain(|id| layout.field(id).is_some());
    }
}
