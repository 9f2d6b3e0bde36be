//! # Drag Host Contract
//!
//! Event shapes passed from the host UI toolkit to a builder when a drag
//! gesture starts, moves over a drop target, and ends. The host owns pointer
//! tracking; these callbacks only carry positions in container lists.

use formsmith_layout::ContainerId;
use serde::{Deserialize, Serialize};

/// A position inside one reorderable list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLocation {
    pub container: ContainerId,
    pub index: usize,
}

impl DragLocation {
    pub fn new(container: ContainerId, index: usize) -> Self {
        Self { container, index }
    }

    /// Location in the top-level section list
    pub fn sections(index: usize) -> Self {
        Self::new(ContainerId::Sections, index)
    }

    /// Location in a section's field list
    pub fn section(section_id: impl Into<String>, index: usize) -> Self {
        Self::new(ContainerId::Section(section_id.into()), index)
    }
}

/// Emitted when the user picks an item up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragStart {
    pub draggable_id: String,
    pub source: DragLocation,
}

/// Emitted while the dragged item hovers over a (possibly absent) target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragUpdate {
    pub draggable_id: String,
    pub source: DragLocation,
    pub destination: Option<DragLocation>,
}

/// Emitted when the gesture completes. `destination` is `None` when the
/// item was dropped outside any valid container or the drag was cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragResult {
    pub draggable_id: String,
    pub source: DragLocation,
    pub destination: Option<DragLocation>,
}

impl DragResult {
    pub fn new(
        draggable_id: impl Into<String>,
        source: DragLocation,
        destination: Option<DragLocation>,
    ) -> Self {
        Self {
            draggable_id: draggable_id.into(),
            source,
            destination,
        }
    }
}

/// Callbacks a host drag-and-drop provider invokes on a builder
pub trait DragHandler {
    /// Returns false when the item may not be dragged (system item, drag
    /// disabled); the host should then abort the gesture.
    fn on_drag_start(&mut self, start: &DragStart) -> bool;

    fn on_drag_update(&mut self, update: &DragUpdate);

    /// Returns true when the drop changed the layout
    fn on_drag_end(&mut self, result: &DragResult) -> bool;
}
