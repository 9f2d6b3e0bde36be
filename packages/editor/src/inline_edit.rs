//! # Inline Edit
//!
//! Text-edit state for one builder widget. At most one item is in edit mode
//! at a time; starting a new edit commits the previous one, the same way a
//! blur would.

use serde::{Deserialize, Serialize};

/// Item whose label is being edited
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "camelCase")]
pub enum EditTarget {
    Section(String),
    Field(String),
}

impl EditTarget {
    pub fn id(&self) -> &str {
        match self {
            EditTarget::Section(id) | EditTarget::Field(id) => id,
        }
    }
}

/// Keys the edit box reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditKey {
    Enter,
    Escape,
}

/// A committed label change the builder should apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub target: EditTarget,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub target: EditTarget,
    pub original: String,
    pub draft: String,
}

#[derive(Debug, Clone, Default)]
pub struct InlineEdit {
    active: Option<EditDraft>,
}

impl InlineEdit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter edit mode for `target`, capturing its current label as the
    /// draft. Any edit already in progress is committed first and its
    /// rename, if any, is returned.
    pub fn begin(&mut self, target: EditTarget, current_label: &str) -> Option<Rename> {
        let previous = self.commit();
        self.active = Some(EditDraft {
            target,
            original: current_label.to_string(),
            draft: current_label.to_string(),
        });
        previous
    }

    /// Replace the working draft. Ignored when nothing is being edited.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let Some(edit) = &mut self.active {
            edit.draft = text.into();
        }
    }

    /// Leave edit mode, returning a rename when the trimmed draft is
    /// non-empty and differs from the original label
    pub fn commit(&mut self) -> Option<Rename> {
        let edit = self.active.take()?;
        let label = edit.draft.trim();

        if label.is_empty() {
            tracing::debug!("edit of {} discarded: empty label", edit.target.id());
            return None;
        }
        if label == edit.original {
            return None;
        }

        Some(Rename {
            target: edit.target,
            label: label.to_string(),
        })
    }

    /// Replace the label the draft is compared against on commit
    pub fn rebase(&mut self, current_label: &str) {
        if let Some(edit) = &mut self.active {
            edit.original = current_label.to_string();
        }
    }

    /// Discard the draft. Returns whether an edit was in progress.
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Enter commits, Escape discards
    pub fn on_key(&mut self, key: EditKey) -> Option<Rename> {
        match key {
            EditKey::Enter => self.commit(),
            EditKey::Escape => {
                self.cancel();
                None
            }
        }
    }

    pub fn active(&self) -> Option<&EditDraft> {
        self.active.as_ref()
    }

    pub fn is_editing(&self, target: &EditTarget) -> bool {
        self.active.as_ref().is_some_and(|e| &e.target == target)
    }

    /// Text to show in the edit box
    pub fn draft(&self) -> Option<&str> {
        self.active.as_ref().map(|e| e.draft.as_str())
    }
}
