//! Serializable session commands.
//!
//! One variant per user interaction, so scripted sessions and browser hosts
//! can drive a [`BuilderSession`](crate::BuilderSession) through a single
//! `dispatch` entry point.

use crate::drag::{DragResult, DragStart, DragUpdate};
use crate::inline_edit::{EditKey, EditTarget};
use formsmith_layout::{FieldKind, FieldOption};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SessionCommand {
    AddSection { name: String },
    RemoveSection { section_id: String },
    RenameSection { section_id: String, name: String },
    ToggleSection { section_id: String },
    ExpandAll,
    CollapseAll,
    MoveSection { section_id: String, index: usize },

    AddField {
        section_id: String,
        label: String,
        kind: FieldKind,
    },
    RemoveField { field_id: String },
    RenameField { field_id: String, label: String },
    SetRequired { field_id: String, required: bool },
    SetOptions {
        field_id: String,
        options: Vec<FieldOption>,
    },
    DuplicateField { field_id: String },
    MoveField {
        field_id: String,
        to_section: String,
        index: usize,
    },

    DragStart(DragStart),
    DragUpdate(DragUpdate),
    DragEnd(DragResult),

    BeginEdit { target: EditTarget },
    EditDraft { text: String },
    EditKey { key: EditKey },
    Blur,

    EnterBulkMode,
    ExitBulkMode,
    ToggleSelected { field_id: String },
    SelectAll,
    DeselectAll,
    BulkDelete,
    BulkDuplicate,
    BulkSetRequired { required: bool },

    Undo,
    Redo,
}
