use serde::{Deserialize, Serialize};
use std::fmt;

pub type SectionId = String;
pub type FieldId = String;

/// Input type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Number,
    Date,
    Select,
    Radio,
    Checkbox,
    Email,
    Phone,
    File,
    Signature,
}

impl FieldKind {
    pub const ALL: [FieldKind; 11] = [
        FieldKind::Text,
        FieldKind::Textarea,
        FieldKind::Number,
        FieldKind::Date,
        FieldKind::Select,
        FieldKind::Radio,
        FieldKind::Checkbox,
        FieldKind::Email,
        FieldKind::Phone,
        FieldKind::File,
        FieldKind::Signature,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Textarea => "textarea",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Select => "select",
            FieldKind::Radio => "radio",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Email => "email",
            FieldKind::Phone => "phone",
            FieldKind::File => "file",
            FieldKind::Signature => "signature",
        }
    }

    /// Whether the kind is a choice list carrying `options`
    pub fn has_options(&self) -> bool {
        matches!(self, FieldKind::Select | FieldKind::Radio)
    }

    /// Whether the field always occupies a whole preview row
    pub fn spans_full_row(&self) -> bool {
        matches!(self, FieldKind::Textarea | FieldKind::Signature)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a select/radio field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A single form input definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: FieldId,

    /// Owning section; rewritten when the field moves between sections
    pub section_id: SectionId,

    pub key: String,
    pub label: String,

    #[serde(rename = "type")]
    pub kind: FieldKind,

    pub is_required: bool,
    pub is_system_field: bool,
    pub order: u32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
}

impl Field {
    /// Create an unattached field. The key is derived from the label and the
    /// section reference is filled in when the field is inserted.
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        let label = label.into();
        Self {
            id: id.into(),
            section_id: String::new(),
            key: crate::key::slugify(&label),
            label,
            kind,
            is_required: false,
            is_system_field: false,
            order: 0,
            options: Vec::new(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Mark as system-defined: pinned in place and not deletable
    pub fn system(mut self) -> Self {
        self.is_system_field = true;
        self
    }

    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }
}

/// A named, ordered grouping of fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,
    pub name: String,
    pub is_expanded: bool,
    pub is_system: bool,
    pub order: u32,
    pub fields: Vec<Field>,
}

impl Section {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_expanded: true,
            is_system: false,
            order: 0,
            fields: Vec::new(),
        }
    }

    /// Mark as system-defined: pinned in place, not renameable or deletable
    pub fn system(mut self) -> Self {
        self.is_system = true;
        self
    }

    pub fn collapsed(mut self) -> Self {
        self.is_expanded = false;
        self
    }

    /// Attach `fields` in the given order, adopting them into this section
    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self.adopt_fields();
        self
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    pub fn position_of(&self, field_id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == field_id)
    }

    /// Insert a field at `index` (clamped to the list length)
    pub fn insert_field(&mut self, index: usize, mut field: Field) -> usize {
        let index = index.min(self.fields.len());
        field.section_id = self.id.clone();
        self.fields.insert(index, field);
        self.renumber_fields();
        index
    }

    pub fn remove_field(&mut self, id: &str) -> Option<Field> {
        let pos = self.position_of(id)?;
        let field = self.fields.remove(pos);
        self.renumber_fields();
        Some(field)
    }

    /// Reassign every field's `order` to its list position
    pub fn renumber_fields(&mut self) {
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.order = i as u32;
        }
    }

    fn adopt_fields(&mut self) {
        for field in &mut self.fields {
            field.section_id = self.id.clone();
        }
        self.renumber_fields();
    }
}

/// Identifies one of the reorderable lists in a layout
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "camelCase")]
pub enum ContainerId {
    /// The top-level list of sections
    Sections,
    /// The field list of one section
    Section(SectionId),
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerId::Sections => f.write_str("sections"),
            ContainerId::Section(id) => write!(f, "section:{}", id),
        }
    }
}

/// The whole form: sections in display order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub sections: Vec<Section>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a layout from sections, normalizing orders and field ownership
    pub fn from_sections(sections: Vec<Section>) -> Self {
        let mut layout = Self { sections };
        for section in &mut layout.sections {
            section.adopt_fields();
        }
        layout.renumber_sections();
        layout
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    pub fn section_position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Find a field anywhere in the layout
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.sections.iter().find_map(|s| s.field(id))
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut Field> {
        self.sections.iter_mut().find_map(|s| s.field_mut(id))
    }

    /// Return `(section index, field index)` of a field
    pub fn locate_field(&self, id: &str) -> Option<(usize, usize)> {
        self.sections
            .iter()
            .enumerate()
            .find_map(|(si, s)| s.position_of(id).map(|fi| (si, fi)))
    }

    /// All field ids in display order
    pub fn field_ids(&self) -> Vec<FieldId> {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter().map(|f| f.id.clone()))
            .collect()
    }

    pub fn field_count(&self) -> usize {
        self.sections.iter().map(|s| s.fields.len()).sum()
    }

    /// Length of a container, or `None` if it does not exist
    pub fn container_len(&self, container: &ContainerId) -> Option<usize> {
        match container {
            ContainerId::Sections => Some(self.sections.len()),
            ContainerId::Section(id) => self.section(id).map(|s| s.fields.len()),
        }
    }

    /// Insert a section at `index` (clamped to the list length)
    pub fn insert_section(&mut self, index: usize, mut section: Section) -> usize {
        let index = index.min(self.sections.len());
        section.adopt_fields();
        self.sections.insert(index, section);
        self.renumber_sections();
        index
    }

    /// Remove a section together with its fields
    pub fn remove_section(&mut self, id: &str) -> Option<Section> {
        let pos = self.section_position(id)?;
        let section = self.sections.remove(pos);
        self.renumber_sections();
        Some(section)
    }

    pub fn renumber_sections(&mut self) {
        for (i, section) in self.sections.iter_mut().enumerate() {
            section.order = i as u32;
        }
    }

    /// Check that every sibling list has contiguous, positional `order`
    /// values and that every field points back at its owning section.
    pub fn is_consistent(&self) -> bool {
        self.sections.iter().enumerate().all(|(si, section)| {
            section.order as usize == si
                && section
                    .fields
                    .iter()
                    .enumerate()
                    .all(|(fi, field)| field.order as usize == fi && field.section_id == section.id)
        })
    }
}
