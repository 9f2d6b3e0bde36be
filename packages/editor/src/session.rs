//! # Builder Session
//!
//! Owns the complete state of one builder instance: the live layout, its
//! snapshot history, inline-edit and bulk-selection state, and the drag in
//! progress. Sessions share nothing, so any number can live side by side.
//!
//! Every layout change goes through [`BuilderSession::apply`] (or a bulk
//! batch), which records one history entry per user action.

use crate::command::SessionCommand;
use crate::drag::{DragHandler, DragLocation, DragResult, DragStart, DragUpdate};
use crate::history::{History, HistoryEntry, HistoryKind, Snapshot, DEFAULT_HISTORY_LIMIT};
use crate::inline_edit::{EditKey, EditTarget, InlineEdit, Rename};
use crate::mutations::{Mutation, MutationError};
use crate::preview::{preview, PreviewPage, Viewport};
use crate::reorder::try_reorder;
use crate::selection::BulkSelection;
use formsmith_layout::{ContainerId, FieldKind, IdGenerator, Layout};
use serde::{Deserialize, Serialize};

/// Interaction features a builder version exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    DragReorder,
    InlineEdit,
    BulkActions,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub drag_reorder: bool,
    pub inline_edit: bool,
    pub bulk_actions: bool,
    pub history: bool,
}

impl Capabilities {
    pub fn all() -> Self {
        Self {
            drag_reorder: true,
            inline_edit: true,
            bulk_actions: true,
            history: true,
        }
    }

    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::DragReorder => self.drag_reorder,
            Capability::InlineEdit => self.inline_edit,
            Capability::BulkActions => self.bulk_actions,
            Capability::History => self.history,
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Maximum history entries (0 = unlimited)
    pub history_limit: usize,
    pub capabilities: Capabilities,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            capabilities: Capabilities::all(),
        }
    }
}

/// Layout-level result of a session operation
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// The layout changed (and a history entry was recorded, if enabled)
    Applied,
    /// Valid request that left the layout as it was
    Unchanged,
    /// Policy no-op without a mutation behind it (rejected drag, unknown id)
    Ignored,
    /// The mutation failed validation; the layout is untouched
    Rejected(MutationError),
    /// The builder version does not offer this interaction
    Disabled(Capability),
}

impl ApplyOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, ApplyOutcome::Applied)
    }
}

/// Drag currently in flight
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDrag {
    pub start: DragStart,
    /// Last hovered destination, for placeholder rendering
    pub over: Option<DragLocation>,
}

/// Single builder instance
pub struct BuilderSession {
    id: String,
    layout: Layout,
    history: History,
    edit: InlineEdit,
    selection: BulkSelection,
    ids: IdGenerator,
    active_drag: Option<ActiveDrag>,
    options: SessionOptions,
}

impl BuilderSession {
    /// Create a session with default options
    pub fn new(id: impl Into<String>, layout: Layout) -> Self {
        Self::with_options(id, layout, SessionOptions::default())
    }

    pub fn with_options(id: impl Into<String>, layout: Layout, options: SessionOptions) -> Self {
        let id = id.into();
        tracing::info!(
            "session {} started ({} sections, history limit {})",
            id,
            layout.sections.len(),
            options.history_limit
        );
        Self {
            ids: IdGenerator::new(&id),
            id,
            layout: Layout::from_sections(layout.sections),
            history: History::with_max_size(options.history_limit),
            edit: InlineEdit::new(),
            selection: BulkSelection::new(),
            active_drag: None,
            options,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn inline_edit(&self) -> &InlineEdit {
        &self.edit
    }

    pub fn selection(&self) -> &BulkSelection {
        &self.selection
    }

    pub fn active_drag(&self) -> Option<&ActiveDrag> {
        self.active_drag.as_ref()
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    fn allows(&self, capability: Capability) -> bool {
        self.options.capabilities.allows(capability)
    }

    /// Apply a mutation and record it as one history step
    pub fn apply(&mut self, mutation: Mutation) -> ApplyOutcome {
        let is_move = matches!(
            mutation,
            Mutation::MoveField { .. } | Mutation::MoveSection { .. }
        );
        if is_move && !self.allows(Capability::DragReorder) {
            return ApplyOutcome::Disabled(Capability::DragReorder);
        }

        let kind = mutation.kind();
        let description = mutation.describe(&self.layout);
        let before = Snapshot::capture(&self.layout);

        match mutation.apply(&mut self.layout) {
            Ok(true) => {
                self.commit(kind, description, before);
                ApplyOutcome::Applied
            }
            Ok(false) => ApplyOutcome::Unchanged,
            Err(err) => {
                tracing::debug!("[{}] {} skipped: {}", self.id, description, err);
                ApplyOutcome::Rejected(err)
            }
        }
    }

    /// Apply several mutations as one history step. Individual mutations
    /// that fail validation are skipped.
    fn apply_batch(&mut self, description: String, mutations: Vec<Mutation>) -> ApplyOutcome {
        let before = Snapshot::capture(&self.layout);
        let mut changed = false;

        for mutation in &mutations {
            match mutation.apply(&mut self.layout) {
                Ok(step_changed) => changed |= step_changed,
                Err(err) => tracing::debug!("[{}] bulk step skipped: {}", self.id, err),
            }
        }

        if !changed {
            return ApplyOutcome::Unchanged;
        }
        self.commit(HistoryKind::Batch, description, before);
        ApplyOutcome::Applied
    }

    fn commit(&mut self, kind: HistoryKind, description: String, before: Snapshot) {
        if self.allows(Capability::History) {
            let after = Snapshot::capture(&self.layout);
            self.history
                .record(HistoryEntry::new(kind, description, before, after));
        }
        self.forget_missing();
    }

    /// Drop selection and edit state that points at removed items
    fn forget_missing(&mut self) {
        self.selection.retain_existing(&self.layout);

        let edit_target_gone = self.edit.active().is_some_and(|edit| match &edit.target {
            EditTarget::Section(id) => self.layout.section(id).is_none(),
            EditTarget::Field(id) => self.layout.field(id).is_none(),
        });
        if edit_target_gone {
            self.edit.cancel();
        }
    }

    // --- Structure ---

    /// Append a new section, returning its id
    pub fn add_section(&mut self, name: &str) -> Option<String> {
        let section_id = self.ids.new_id();
        let outcome = self.apply(Mutation::AddSection {
            section_id: section_id.clone(),
            name: name.to_string(),
            index: None,
        });
        outcome.changed().then_some(section_id)
    }

    /// Append a new field to a section, returning its id
    pub fn add_field(&mut self, section_id: &str, label: &str, kind: FieldKind) -> Option<String> {
        let field_id = self.ids.new_id();
        let outcome = self.apply(Mutation::AddField {
            section_id: section_id.to_string(),
            field_id: field_id.clone(),
            label: label.to_string(),
            kind,
            index: None,
        });
        outcome.changed().then_some(field_id)
    }

    /// Copy a field directly after the original, returning the copy's id
    pub fn duplicate_field(&mut self, field_id: &str) -> Option<String> {
        let new_id = self.ids.new_id();
        let outcome = self.apply(Mutation::DuplicateField {
            field_id: field_id.to_string(),
            new_id: new_id.clone(),
        });
        outcome.changed().then_some(new_id)
    }

    pub fn toggle_section(&mut self, section_id: &str) -> ApplyOutcome {
        let Some(section) = self.layout.section(section_id) else {
            return ApplyOutcome::Rejected(MutationError::SectionNotFound(section_id.to_string()));
        };
        let expanded = !section.is_expanded;
        self.apply(Mutation::SetSectionExpanded {
            section_id: section_id.to_string(),
            expanded,
        })
    }

    // --- History ---

    pub fn can_undo(&self) -> bool {
        self.allows(Capability::History) && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.allows(Capability::History) && self.history.can_redo()
    }

    pub fn undo(&mut self) -> ApplyOutcome {
        if !self.allows(Capability::History) {
            return ApplyOutcome::Disabled(Capability::History);
        }
        match self.history.undo() {
            Some(snapshot) => self.restore(snapshot),
            None => ApplyOutcome::Unchanged,
        }
    }

    pub fn redo(&mut self) -> ApplyOutcome {
        if !self.allows(Capability::History) {
            return ApplyOutcome::Disabled(Capability::History);
        }
        match self.history.redo() {
            Some(snapshot) => self.restore(snapshot),
            None => ApplyOutcome::Unchanged,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) -> ApplyOutcome {
        self.active_drag = None;
        self.layout = snapshot.into_layout();
        self.forget_missing();
        self.rebase_edit();
        ApplyOutcome::Applied
    }

    /// Point the active edit's original label at the live layout
    fn rebase_edit(&mut self) {
        let Some(target) = self.edit.active().map(|edit| edit.target.clone()) else {
            return;
        };
        match self.current_label(&target) {
            Ok(label) => self.edit.rebase(&label),
            Err(_) => {
                self.edit.cancel();
            }
        }
    }

    // --- Inline edit ---

    /// Editable label of `target` as it is in the layout right now
    fn current_label(&self, target: &EditTarget) -> Result<String, MutationError> {
        match target {
            EditTarget::Section(id) => match self.layout.section(id) {
                Some(section) if section.is_system => Err(MutationError::SystemSection(id.clone())),
                Some(section) => Ok(section.name.clone()),
                None => Err(MutationError::SectionNotFound(id.clone())),
            },
            EditTarget::Field(id) => match self.layout.field(id) {
                Some(field) => Ok(field.label.clone()),
                None => Err(MutationError::FieldNotFound(id.clone())),
            },
        }
    }

    /// Put `target` into edit mode. An edit already in progress is committed
    /// first; the returned outcome is that commit's.
    pub fn begin_edit(&mut self, target: EditTarget) -> ApplyOutcome {
        if !self.allows(Capability::InlineEdit) {
            return ApplyOutcome::Disabled(Capability::InlineEdit);
        }
        if let Err(err) = self.current_label(&target) {
            return ApplyOutcome::Rejected(err);
        }

        let committed = self.commit_edit();

        // The commit may have renamed the target itself
        match self.current_label(&target) {
            Ok(label) => {
                self.edit.begin(target, &label);
                committed
            }
            Err(err) => ApplyOutcome::Rejected(err),
        }
    }

    pub fn set_edit_draft(&mut self, text: &str) {
        self.edit.set_draft(text);
    }

    /// Commit the draft (blur or Enter)
    pub fn commit_edit(&mut self) -> ApplyOutcome {
        match self.edit.commit() {
            Some(rename) => self.apply_rename(rename),
            None => ApplyOutcome::Unchanged,
        }
    }

    /// Discard the draft (Escape)
    pub fn cancel_edit(&mut self) -> bool {
        self.edit.cancel()
    }

    pub fn edit_key(&mut self, key: EditKey) -> ApplyOutcome {
        match self.edit.on_key(key) {
            Some(rename) => self.apply_rename(rename),
            None => ApplyOutcome::Unchanged,
        }
    }

    fn apply_rename(&mut self, rename: Rename) -> ApplyOutcome {
        let mutation = match rename.target {
            EditTarget::Section(section_id) => Mutation::RenameSection {
                section_id,
                name: rename.label,
            },
            EditTarget::Field(field_id) => Mutation::RenameField {
                field_id,
                label: rename.label,
            },
        };
        self.apply(mutation)
    }

    // --- Bulk selection ---

    pub fn enter_bulk_mode(&mut self) -> bool {
        if !self.allows(Capability::BulkActions) {
            return false;
        }
        self.selection.enter();
        true
    }

    pub fn exit_bulk_mode(&mut self) {
        self.selection.exit();
    }

    /// Toggle a field's membership in the selection. Returns whether the
    /// field is selected afterwards.
    pub fn toggle_selected(&mut self, field_id: &str) -> bool {
        if !self.allows(Capability::BulkActions) || self.layout.field(field_id).is_none() {
            return false;
        }
        self.selection.toggle(field_id)
    }

    pub fn select_all(&mut self) {
        if self.allows(Capability::BulkActions) {
            self.selection.select_all(self.layout.field_ids());
        }
    }

    pub fn deselect_all(&mut self) {
        self.selection.deselect_all();
    }

    /// Delete every selected field. System fields are skipped.
    pub fn bulk_delete(&mut self) -> ApplyOutcome {
        self.bulk(|_, ids| {
            let description = format!("Deleted {} fields", ids.len());
            let mutations = ids
                .into_iter()
                .map(|field_id| Mutation::RemoveField { field_id })
                .collect();
            (description, mutations)
        })
    }

    /// Duplicate every selected field in place
    pub fn bulk_duplicate(&mut self) -> ApplyOutcome {
        self.bulk(|id_gen, ids| {
            let description = format!("Duplicated {} fields", ids.len());
            let mutations = ids
                .into_iter()
                .map(|field_id| Mutation::DuplicateField {
                    field_id,
                    new_id: id_gen.new_id(),
                })
                .collect();
            (description, mutations)
        })
    }

    /// Set the required flag on every selected field. System fields are skipped.
    pub fn bulk_set_required(&mut self, required: bool) -> ApplyOutcome {
        self.bulk(|_, ids| {
            let description = format!(
                "Marked {} fields {}",
                ids.len(),
                if required { "required" } else { "optional" }
            );
            let mutations = ids
                .into_iter()
                .map(|field_id| Mutation::SetFieldRequired { field_id, required })
                .collect();
            (description, mutations)
        })
    }

    fn bulk<F>(&mut self, build: F) -> ApplyOutcome
    where
        F: FnOnce(&mut IdGenerator, Vec<String>) -> (String, Vec<Mutation>),
    {
        if !self.allows(Capability::BulkActions) {
            return ApplyOutcome::Disabled(Capability::BulkActions);
        }

        let ids = self.selection.take_ordered(&self.layout);
        if ids.is_empty() {
            return ApplyOutcome::Unchanged;
        }

        let (description, mutations) = build(&mut self.ids, ids);
        self.apply_batch(description, mutations)
    }

    // --- Preview ---

    pub fn preview(&self, viewport: Viewport) -> PreviewPage {
        preview(&self.layout, viewport)
    }

    // --- Commands ---

    /// Run one serialized interaction
    pub fn dispatch(&mut self, command: SessionCommand) -> ApplyOutcome {
        match command {
            SessionCommand::AddSection { name } => match self.add_section(&name) {
                Some(_) => ApplyOutcome::Applied,
                None => ApplyOutcome::Ignored,
            },
            SessionCommand::RemoveSection { section_id } => {
                self.apply(Mutation::RemoveSection { section_id })
            }
            SessionCommand::RenameSection { section_id, name } => {
                self.apply(Mutation::RenameSection { section_id, name })
            }
            SessionCommand::ToggleSection { section_id } => self.toggle_section(&section_id),
            SessionCommand::ExpandAll => {
                self.apply(Mutation::SetAllSectionsExpanded { expanded: true })
            }
            SessionCommand::CollapseAll => {
                self.apply(Mutation::SetAllSectionsExpanded { expanded: false })
            }
            SessionCommand::MoveSection { section_id, index } => {
                self.apply(Mutation::MoveSection { section_id, index })
            }

            SessionCommand::AddField {
                section_id,
                label,
                kind,
            } => match self.add_field(&section_id, &label, kind) {
                Some(_) => ApplyOutcome::Applied,
                None => ApplyOutcome::Ignored,
            },
            SessionCommand::RemoveField { field_id } => {
                self.apply(Mutation::RemoveField { field_id })
            }
            SessionCommand::RenameField { field_id, label } => {
                self.apply(Mutation::RenameField { field_id, label })
            }
            SessionCommand::SetRequired { field_id, required } => {
                self.apply(Mutation::SetFieldRequired { field_id, required })
            }
            SessionCommand::SetOptions { field_id, options } => {
                self.apply(Mutation::SetFieldOptions { field_id, options })
            }
            SessionCommand::DuplicateField { field_id } => {
                match self.duplicate_field(&field_id) {
                    Some(_) => ApplyOutcome::Applied,
                    None => ApplyOutcome::Ignored,
                }
            }
            SessionCommand::MoveField {
                field_id,
                to_section,
                index,
            } => self.apply(Mutation::MoveField {
                field_id,
                to_section,
                index,
            }),

            SessionCommand::DragStart(start) => {
                if !self.allows(Capability::DragReorder) {
                    ApplyOutcome::Disabled(Capability::DragReorder)
                } else if self.on_drag_start(&start) {
                    ApplyOutcome::Unchanged
                } else {
                    ApplyOutcome::Ignored
                }
            }
            SessionCommand::DragUpdate(update) => {
                self.on_drag_update(&update);
                ApplyOutcome::Unchanged
            }
            SessionCommand::DragEnd(result) => {
                if !self.allows(Capability::DragReorder) {
                    ApplyOutcome::Disabled(Capability::DragReorder)
                } else if self.on_drag_end(&result) {
                    ApplyOutcome::Applied
                } else {
                    ApplyOutcome::Ignored
                }
            }

            SessionCommand::BeginEdit { target } => self.begin_edit(target),
            SessionCommand::EditDraft { text } => {
                self.set_edit_draft(&text);
                ApplyOutcome::Unchanged
            }
            SessionCommand::EditKey { key } => self.edit_key(key),
            SessionCommand::Blur => self.commit_edit(),

            SessionCommand::EnterBulkMode => {
                if self.enter_bulk_mode() {
                    ApplyOutcome::Unchanged
                } else {
                    ApplyOutcome::Disabled(Capability::BulkActions)
                }
            }
            SessionCommand::ExitBulkMode => {
                self.exit_bulk_mode();
                ApplyOutcome::Unchanged
            }
            SessionCommand::ToggleSelected { field_id } => {
                if !self.allows(Capability::BulkActions) {
                    ApplyOutcome::Disabled(Capability::BulkActions)
                } else if self.layout.field(&field_id).is_none() {
                    ApplyOutcome::Ignored
                } else {
                    self.toggle_selected(&field_id);
                    ApplyOutcome::Unchanged
                }
            }
            SessionCommand::SelectAll => {
                self.select_all();
                ApplyOutcome::Unchanged
            }
            SessionCommand::DeselectAll => {
                self.deselect_all();
                ApplyOutcome::Unchanged
            }
            SessionCommand::BulkDelete => self.bulk_delete(),
            SessionCommand::BulkDuplicate => self.bulk_duplicate(),
            SessionCommand::BulkSetRequired { required } => self.bulk_set_required(required),

            SessionCommand::Undo => self.undo(),
            SessionCommand::Redo => self.redo(),
        }
    }

    /// Whether the item a drag would pick up exists and may move
    fn is_draggable(&self, start: &DragStart) -> bool {
        match &start.source.container {
            ContainerId::Sections => self
                .layout
                .sections
                .get(start.source.index)
                .is_some_and(|s| s.id == start.draggable_id && !s.is_system),
            ContainerId::Section(section_id) => self
                .layout
                .section(section_id)
                .and_then(|s| s.fields.get(start.source.index))
                .is_some_and(|f| f.id == start.draggable_id && !f.is_system_field),
        }
    }

    /// Mutation equivalent of a drop, used for its history kind and description
    fn drop_mutation(result: &DragResult, destination: &DragLocation) -> Mutation {
        match &destination.container {
            ContainerId::Sections => Mutation::MoveSection {
                section_id: result.draggable_id.clone(),
                index: destination.index,
            },
            ContainerId::Section(to_section) => Mutation::MoveField {
                field_id: result.draggable_id.clone(),
                to_section: to_section.clone(),
                index: destination.index,
            },
        }
    }
}

impl DragHandler for BuilderSession {
    fn on_drag_start(&mut self, start: &DragStart) -> bool {
        if !self.allows(Capability::DragReorder) || !self.is_draggable(start) {
            tracing::debug!("[{}] drag of {} refused", self.id, start.draggable_id);
            self.active_drag = None;
            return false;
        }

        self.active_drag = Some(ActiveDrag {
            start: start.clone(),
            over: Some(start.source.clone()),
        });
        true
    }

    fn on_drag_update(&mut self, update: &DragUpdate) {
        if let Some(active) = &mut self.active_drag {
            if active.start.draggable_id == update.draggable_id {
                tracing::trace!(
                    "[{}] {} over {:?}",
                    self.id,
                    update.draggable_id,
                    update.destination
                );
                active.over = update.destination.clone();
            }
        }
    }

    fn on_drag_end(&mut self, result: &DragResult) -> bool {
        self.active_drag = None;
        if !self.allows(Capability::DragReorder) {
            return false;
        }

        match try_reorder(&self.layout, result) {
            Ok(next) => {
                let mutation = match &result.destination {
                    Some(destination) => Self::drop_mutation(result, destination),
                    None => return false,
                };
                let description = mutation.describe(&self.layout);
                let before = Snapshot::capture(&self.layout);
                self.layout = next;
                self.commit(mutation.kind(), description, before);
                true
            }
            Err(reason) => {
                tracing::debug!(
                    "[{}] drop of {} ignored: {}",
                    self.id,
                    result.draggable_id,
                    reason
                );
                false
            }
        }
    }
}
