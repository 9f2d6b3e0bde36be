//! # Formsmith Editor
//!
//! Interaction engine for the form-layout builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ layout: sections, fields, ordering          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: BuilderSession                      │
//! │  - Drag lifecycle → reorder engine          │
//! │  - Inline label edits                       │
//! │  - Bulk selection and batch actions         │
//! │  - Snapshot undo/redo                       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ preview: rows per viewport width            │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Ordered lists are the truth**: `order` always mirrors list position
//! 2. **Rejected input is a no-op**: stale or invalid drags never corrupt state
//! 3. **One action, one history step**: bulk actions are recorded as a batch
//! 4. **Sessions are isolated**: no state is shared between builders
//!
//! ## Usage
//!
//! ```rust,ignore
//! use formsmith_editor::{BuilderSession, DragHandler, DragLocation, DragResult};
//!
//! let mut session = BuilderSession::new("builder-1", layout);
//!
//! session.on_drag_end(&DragResult::new(
//!     "field-p",
//!     DragLocation::section("readings", 0),
//!     Some(DragLocation::section("readings", 1)),
//! ));
//!
//! session.undo();
//! ```

mod command;
mod drag;
mod history;
mod inline_edit;
mod mutations;
mod preview;
mod reorder;
mod selection;
mod session;

pub use command::SessionCommand;
pub use drag::{DragHandler, DragLocation, DragResult, DragStart, DragUpdate};
pub use history::{History, HistoryEntry, HistoryKind, Snapshot, DEFAULT_HISTORY_LIMIT};
pub use inline_edit::{EditDraft, EditKey, EditTarget, InlineEdit, Rename};
pub use mutations::{Mutation, MutationError};
pub use preview::{preview, PreviewCell, PreviewPage, PreviewRow, PreviewSection, Viewport};
pub use reorder::{reorder, try_reorder, DropRejected};
pub use selection::BulkSelection;
pub use session::{
    ActiveDrag, ApplyOutcome, BuilderSession, Capabilities, Capability, SessionOptions,
};

// Re-export layout types for convenience
pub use formsmith_layout::{ContainerId, Field, FieldKind, FieldOption, Layout, Section};
