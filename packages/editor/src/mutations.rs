//! # Layout Mutations
//!
//! Semantic operations on a form layout. Every structural change made by a
//! builder goes through one of these, so the `order` invariant and the
//! system-item policy are enforced in one place.
//!
//! ## Mutation Semantics
//!
//! ### Policy
//! - System sections cannot be removed, renamed or moved
//! - System fields cannot be removed, moved, or have their required flag changed
//! - Labels and names are trimmed; empty values are rejected
//!
//! ### Apply
//! - `validate` runs first, so a rejected mutation leaves the layout untouched
//! - `apply` returns `Ok(false)` when the mutation is valid but changes nothing
//!   (renaming to the current label, moving to the current index)
//!
//! ### Remove
//! - Removing a section removes all of its fields

use crate::history::HistoryKind;
use crate::reorder::{move_field, move_section};
use formsmith_common::VisitorMut;
use formsmith_layout::{unique_key, Field, FieldKind, FieldOption, Layout, Section};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations on a layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Insert a new empty section (appended when `index` is absent)
    AddSection {
        section_id: String,
        name: String,
        index: Option<usize>,
    },

    /// Delete a section and its fields
    RemoveSection { section_id: String },

    RenameSection { section_id: String, name: String },

    SetSectionExpanded { section_id: String, expanded: bool },

    /// Expand or collapse every section at once
    SetAllSectionsExpanded { expanded: bool },

    /// Insert a new field (appended when `index` is absent)
    AddField {
        section_id: String,
        field_id: String,
        label: String,
        kind: FieldKind,
        index: Option<usize>,
    },

    RemoveField { field_id: String },

    RenameField { field_id: String, label: String },

    SetFieldRequired { field_id: String, required: bool },

    /// Replace the choices of a select/radio field
    SetFieldOptions {
        field_id: String,
        options: Vec<FieldOption>,
    },

    /// Copy a field directly after the original
    DuplicateField { field_id: String, new_id: String },

    /// Move a field to `index` in `to_section` (same or different section)
    MoveField {
        field_id: String,
        to_section: String,
        index: usize,
    },

    MoveSection { section_id: String, index: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Section {0} is system-defined")]
    SystemSection(String),

    #[error("Field {0} is system-defined")]
    SystemField(String),

    #[error("Id already in use: {0}")]
    DuplicateId(String),

    #[error("Label cannot be empty")]
    EmptyLabel,

    #[error("Field {0} does not take options")]
    NotAChoiceField(String),
}

impl Mutation {
    /// Apply mutation to the layout with validation
    ///
    /// Returns whether the layout changed.
    pub fn apply(&self, layout: &mut Layout) -> Result<bool, MutationError> {
        self.validate(layout)?;

        match self {
            Mutation::AddSection {
                section_id,
                name,
                index,
            } => {
                let section = Section::new(section_id.clone(), name.trim());
                let index = index.unwrap_or(layout.sections.len());
                layout.insert_section(index, section);
                Ok(true)
            }

            Mutation::RemoveSection { section_id } => {
                Ok(layout.remove_section(section_id).is_some())
            }

            Mutation::RenameSection { section_id, name } => {
                let section = Self::section_mut(layout, section_id)?;
                Ok(replace_if_changed(&mut section.name, name.trim()))
            }

            Mutation::SetSectionExpanded {
                section_id,
                expanded,
            } => {
                let section = Self::section_mut(layout, section_id)?;
                let changed = section.is_expanded != *expanded;
                section.is_expanded = *expanded;
                Ok(changed)
            }

            Mutation::SetAllSectionsExpanded { expanded } => {
                let mut expander = ExpandAll {
                    expanded: *expanded,
                    changed: false,
                };
                expander.visit_layout_mut(layout);
                Ok(expander.changed)
            }

            Mutation::AddField {
                section_id,
                field_id,
                label,
                kind,
                index,
            } => {
                let section = Self::section_mut(layout, section_id)?;
                let mut field = Field::new(field_id.clone(), label.trim(), *kind);
                field.key = unique_key(section, &field.key, None);
                let index = index.unwrap_or(section.fields.len());
                section.insert_field(index, field);
                Ok(true)
            }

            Mutation::RemoveField { field_id } => {
                let (si, _) = Self::locate(layout, field_id)?;
                Ok(layout.sections[si].remove_field(field_id).is_some())
            }

            Mutation::RenameField { field_id, label } => {
                let field = Self::field_mut(layout, field_id)?;
                Ok(replace_if_changed(&mut field.label, label.trim()))
            }

            Mutation::SetFieldRequired { field_id, required } => {
                let field = Self::field_mut(layout, field_id)?;
                let changed = field.is_required != *required;
                field.is_required = *required;
                Ok(changed)
            }

            Mutation::SetFieldOptions { field_id, options } => {
                let field = Self::field_mut(layout, field_id)?;
                let changed = field.options != *options;
                field.options = options.clone();
                Ok(changed)
            }

            Mutation::DuplicateField { field_id, new_id } => {
                let (si, fi) = Self::locate(layout, field_id)?;
                let section = &mut layout.sections[si];
                let original = &section.fields[fi];

                let mut copy = original.clone();
                copy.id = new_id.clone();
                copy.label = format!("{} (copy)", original.label);
                copy.is_system_field = false;
                copy.key = unique_key(section, &original.key, None);

                section.insert_field(fi + 1, copy);
                Ok(true)
            }

            Mutation::MoveField {
                field_id,
                to_section,
                index,
            } => move_field(layout, field_id, to_section, *index),

            Mutation::MoveSection { section_id, index } => {
                move_section(layout, section_id, *index)
            }
        }
    }

    /// Validate without applying
    pub fn validate(&self, layout: &Layout) -> Result<(), MutationError> {
        match self {
            Mutation::AddSection {
                section_id, name, ..
            } => {
                Self::check_unused(layout, section_id)?;
                Self::check_label(name)
            }

            Mutation::RemoveSection { section_id } => {
                let section = Self::section(layout, section_id)?;
                if section.is_system {
                    return Err(MutationError::SystemSection(section_id.clone()));
                }
                Ok(())
            }

            Mutation::RenameSection { section_id, name } => {
                let section = Self::section(layout, section_id)?;
                if section.is_system {
                    return Err(MutationError::SystemSection(section_id.clone()));
                }
                Self::check_label(name)
            }

            Mutation::SetSectionExpanded { section_id, .. } => {
                Self::section(layout, section_id)?;
                Ok(())
            }

            Mutation::SetAllSectionsExpanded { .. } => Ok(()),

            Mutation::AddField {
                section_id,
                field_id,
                label,
                ..
            } => {
                Self::section(layout, section_id)?;
                Self::check_unused(layout, field_id)?;
                Self::check_label(label)
            }

            Mutation::RemoveField { field_id } => {
                let field = Self::field(layout, field_id)?;
                if field.is_system_field {
                    return Err(MutationError::SystemField(field_id.clone()));
                }
                Ok(())
            }

            Mutation::RenameField { field_id, label } => {
                Self::field(layout, field_id)?;
                Self::check_label(label)
            }

            Mutation::SetFieldRequired { field_id, .. } => {
                let field = Self::field(layout, field_id)?;
                if field.is_system_field {
                    return Err(MutationError::SystemField(field_id.clone()));
                }
                Ok(())
            }

            Mutation::SetFieldOptions { field_id, .. } => {
                let field = Self::field(layout, field_id)?;
                if !field.kind.has_options() {
                    return Err(MutationError::NotAChoiceField(field_id.clone()));
                }
                Ok(())
            }

            Mutation::DuplicateField { field_id, new_id } => {
                Self::field(layout, field_id)?;
                Self::check_unused(layout, new_id)
            }

            Mutation::MoveField {
                field_id,
                to_section,
                ..
            } => {
                let field = Self::field(layout, field_id)?;
                if field.is_system_field {
                    return Err(MutationError::SystemField(field_id.clone()));
                }
                Self::section(layout, to_section)?;
                Ok(())
            }

            Mutation::MoveSection { section_id, .. } => {
                let section = Self::section(layout, section_id)?;
                if section.is_system {
                    return Err(MutationError::SystemSection(section_id.clone()));
                }
                Ok(())
            }
        }
    }

    /// History category for this mutation
    pub fn kind(&self) -> HistoryKind {
        match self {
            Mutation::AddSection { .. } => HistoryKind::AddSection,
            Mutation::RemoveSection { .. } => HistoryKind::RemoveSection,
            Mutation::RenameSection { .. } => HistoryKind::RenameSection,
            Mutation::SetSectionExpanded { .. } | Mutation::SetAllSectionsExpanded { .. } => {
                HistoryKind::ToggleSection
            }
            Mutation::AddField { .. } => HistoryKind::AddField,
            Mutation::RemoveField { .. } => HistoryKind::RemoveField,
            Mutation::RenameField { .. } => HistoryKind::RenameField,
            Mutation::SetFieldRequired { .. } | Mutation::SetFieldOptions { .. } => {
                HistoryKind::UpdateField
            }
            Mutation::DuplicateField { .. } => HistoryKind::DuplicateField,
            Mutation::MoveField { .. } => HistoryKind::MoveField,
            Mutation::MoveSection { .. } => HistoryKind::MoveSection,
        }
    }

    /// Human-readable description, computed against the layout the
    /// mutation is about to be applied to
    pub fn describe(&self, layout: &Layout) -> String {
        let section_name = |id: &str| {
            layout
                .section(id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| id.to_string())
        };
        let field_label = |id: &str| {
            layout
                .field(id)
                .map(|f| f.label.clone())
                .unwrap_or_else(|| id.to_string())
        };

        match self {
            Mutation::AddSection { name, .. } => format!("Added section \"{}\"", name.trim()),
            Mutation::RemoveSection { section_id } => {
                format!("Deleted section \"{}\"", section_name(section_id))
            }
            Mutation::RenameSection { section_id, name } => format!(
                "Renamed section \"{}\" to \"{}\"",
                section_name(section_id),
                name.trim()
            ),
            Mutation::SetSectionExpanded {
                section_id,
                expanded,
            } => format!(
                "{} section \"{}\"",
                if *expanded { "Expanded" } else { "Collapsed" },
                section_name(section_id)
            ),
            Mutation::SetAllSectionsExpanded { expanded } => {
                if *expanded {
                    "Expanded all sections".to_string()
                } else {
                    "Collapsed all sections".to_string()
                }
            }
            Mutation::AddField {
                section_id, label, ..
            } => format!(
                "Added field \"{}\" to \"{}\"",
                label.trim(),
                section_name(section_id)
            ),
            Mutation::RemoveField { field_id } => {
                format!("Deleted field \"{}\"", field_label(field_id))
            }
            Mutation::RenameField { field_id, label } => format!(
                "Renamed field \"{}\" to \"{}\"",
                field_label(field_id),
                label.trim()
            ),
            Mutation::SetFieldRequired { field_id, required } => format!(
                "Marked \"{}\" {}",
                field_label(field_id),
                if *required { "required" } else { "optional" }
            ),
            Mutation::SetFieldOptions { field_id, options } => format!(
                "Set {} options on \"{}\"",
                options.len(),
                field_label(field_id)
            ),
            Mutation::DuplicateField { field_id, .. } => {
                format!("Duplicated field \"{}\"", field_label(field_id))
            }
            Mutation::MoveField {
                field_id,
                to_section,
                index,
            } => format!(
                "Moved field \"{}\" to \"{}\" at position {}",
                field_label(field_id),
                section_name(to_section),
                index + 1
            ),
            Mutation::MoveSection { section_id, index } => format!(
                "Moved section \"{}\" to position {}",
                section_name(section_id),
                index + 1
            ),
        }
    }

    fn check_label(label: &str) -> Result<(), MutationError> {
        if label.trim().is_empty() {
            Err(MutationError::EmptyLabel)
        } else {
            Ok(())
        }
    }

    fn check_unused(layout: &Layout, id: &str) -> Result<(), MutationError> {
        if layout.section(id).is_some() || layout.field(id).is_some() {
            Err(MutationError::DuplicateId(id.to_string()))
        } else {
            Ok(())
        }
    }

    fn section<'a>(layout: &'a Layout, id: &str) -> Result<&'a Section, MutationError> {
        layout
            .section(id)
            .ok_or_else(|| MutationError::SectionNotFound(id.to_string()))
    }

    fn section_mut<'a>(layout: &'a mut Layout, id: &str) -> Result<&'a mut Section, MutationError> {
        layout
            .section_mut(id)
            .ok_or_else(|| MutationError::SectionNotFound(id.to_string()))
    }

    fn field<'a>(layout: &'a Layout, id: &str) -> Result<&'a Field, MutationError> {
        layout
            .field(id)
            .ok_or_else(|| MutationError::FieldNotFound(id.to_string()))
    }

    fn field_mut<'a>(layout: &'a mut Layout, id: &str) -> Result<&'a mut Field, MutationError> {
        layout
            .field_mut(id)
            .ok_or_else(|| MutationError::FieldNotFound(id.to_string()))
    }

    fn locate(layout: &Layout, id: &str) -> Result<(usize, usize), MutationError> {
        layout
            .locate_field(id)
            .ok_or_else(|| MutationError::FieldNotFound(id.to_string()))
    }
}

fn replace_if_changed(slot: &mut String, value: &str) -> bool {
    if slot == value {
        false
    } else {
        *slot = value.to_string();
        true
    }
}

struct ExpandAll {
    expanded: bool,
    changed: bool,
}

impl VisitorMut for ExpandAll {
    fn visit_section_mut(&mut self, section: &mut Section) {
        if section.is_expanded != self.expanded {
            section.is_expanded = self.expanded;
            self.changed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Layout {
        Layout::from_sections(vec![
            Section::new("site", "Site").system().with_fields(vec![
                Field::new("site_id", "Site ID", FieldKind::Text).system().required(),
            ]),
            Section::new("readings", "Readings").with_fields(vec![
                Field::new("p", "Pressure", FieldKind::Number),
                Field::new("q", "Flow", FieldKind::Number),
            ]),
        ])
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::RenameField {
            field_id: "p".to_string(),
            label: "Pressure (bar)".to_string(),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        assert!(json.contains("\"op\":\"renameField\""));
        assert!(json.contains("\"fieldId\":\"p\""));

        let deserialized: Mutation = serde_json::from_str(&json).unwrap();
        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_whitespace_rename_leaves_label() {
        let mut layout = sample();
        let mutation = Mutation::RenameField {
            field_id: "p".to_string(),
            label: "  ".to_string(),
        };

        assert_eq!(mutation.apply(&mut layout), Err(MutationError::EmptyLabel));
        assert_eq!(layout.field("p").unwrap().label, "Pressure");
    }

    #[test]
    fn test_rename_trims_and_keeps_key() {
        let mut layout = sample();
        let mutation = Mutation::RenameField {
            field_id: "p".to_string(),
            label: "  Line pressure ".to_string(),
        };

        assert_eq!(mutation.apply(&mut layout), Ok(true));
        let field = layout.field("p").unwrap();
        assert_eq!(field.label, "Line pressure");
        assert_eq!(field.key, "pressure");
    }

    #[test]
    fn test_rename_to_same_label_is_unchanged() {
        let mut layout = sample();
        let mutation = Mutation::RenameSection {
            section_id: "readings".to_string(),
            name: "Readings ".to_string(),
        };
        assert_eq!(mutation.apply(&mut layout), Ok(false));
    }

    #[test]
    fn test_system_section_is_locked() {
        let mut layout = sample();
        let before = layout.clone();

        for mutation in [
            Mutation::RemoveSection {
                section_id: "site".to_string(),
            },
            Mutation::RenameSection {
                section_id: "site".to_string(),
                name: "Location".to_string(),
            },
            Mutation::MoveSection {
                section_id: "site".to_string(),
                index: 1,
            },
        ] {
            assert_eq!(
                mutation.apply(&mut layout),
                Err(MutationError::SystemSection("site".to_string()))
            );
        }
        assert_eq!(layout, before);
    }

    #[test]
    fn test_system_field_is_locked() {
        let mut layout = sample();
        let remove = Mutation::RemoveField {
            field_id: "site_id".to_string(),
        };
        let required = Mutation::SetFieldRequired {
            field_id: "site_id".to_string(),
            required: false,
        };

        assert!(matches!(remove.apply(&mut layout), Err(MutationError::SystemField(_))));
        assert!(matches!(required.apply(&mut layout), Err(MutationError::SystemField(_))));
        assert!(layout.field("site_id").is_some());
    }

    #[test]
    fn test_add_field_uniquifies_key() {
        let mut layout = sample();
        let mutation = Mutation::AddField {
            section_id: "readings".to_string(),
            field_id: "p2".to_string(),
            label: "Pressure".to_string(),
            kind: FieldKind::Number,
            index: Some(0),
        };

        assert_eq!(mutation.apply(&mut layout), Ok(true));
        let section = layout.section("readings").unwrap();
        assert_eq!(section.fields[0].id, "p2");
        assert_eq!(section.fields[0].key, "pressure_2");
        assert!(layout.is_consistent());
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut layout = sample();
        let mutation = Mutation::AddSection {
            section_id: "p".to_string(),
            name: "Other".to_string(),
            index: None,
        };
        assert_eq!(
            mutation.apply(&mut layout),
            Err(MutationError::DuplicateId("p".to_string()))
        );
    }

    #[test]
    fn test_remove_section_removes_fields() {
        let mut layout = sample();
        let mutation = Mutation::RemoveSection {
            section_id: "readings".to_string(),
        };
        assert_eq!(mutation.apply(&mut layout), Ok(true));
        assert!(layout.field("p").is_none());
        assert_eq!(layout.sections.len(), 1);
    }

    #[test]
    fn test_duplicate_field_inserts_after_original() {
        let mut layout = sample();
        let mutation = Mutation::DuplicateField {
            field_id: "p".to_string(),
            new_id: "p_copy".to_string(),
        };

        assert_eq!(mutation.apply(&mut layout), Ok(true));
        let section = layout.section("readings").unwrap();
        let ids: Vec<_> = section.fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["p", "p_copy", "q"]);
        assert_eq!(section.fields[1].label, "Pressure (copy)");
        assert_eq!(section.fields[1].key, "pressure_2");
        assert!(layout.is_consistent());
    }

    #[test]
    fn test_duplicate_of_system_field_is_not_system() {
        let mut layout = sample();
        let mutation = Mutation::DuplicateField {
            field_id: "site_id".to_string(),
            new_id: "site_id_copy".to_string(),
        };
        mutation.apply(&mut layout).unwrap();
        assert!(!layout.field("site_id_copy").unwrap().is_system_field);
    }

    #[test]
    fn test_set_options_requires_choice_field() {
        let mut layout = sample();
        let mutation = Mutation::SetFieldOptions {
            field_id: "p".to_string(),
            options: vec![FieldOption::new("a", "A")],
        };
        assert_eq!(
            mutation.apply(&mut layout),
            Err(MutationError::NotAChoiceField("p".to_string()))
        );
    }

    #[test]
    fn test_collapse_all() {
        let mut layout = sample();
        let collapse = Mutation::SetAllSectionsExpanded { expanded: false };
        assert_eq!(collapse.apply(&mut layout), Ok(true));
        assert!(layout.sections.iter().all(|s| !s.is_expanded));
        assert_eq!(collapse.apply(&mut layout), Ok(false));
    }

    #[test]
    fn test_describe_uses_current_names() {
        let layout = sample();
        let mutation = Mutation::MoveField {
            field_id: "p".to_string(),
            to_section: "readings".to_string(),
            index: 1,
        };
        assert_eq!(
            mutation.describe(&layout),
            "Moved field \"Pressure\" to \"Readings\" at position 2"
        );
        assert_eq!(mutation.kind(), HistoryKind::MoveField);
    }
}
