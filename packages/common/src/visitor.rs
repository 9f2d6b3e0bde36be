use formsmith_layout::{Field, Layout, Section};

/// Visitor pattern for traversing a layout immutably
///
/// Default implementations walk every section and field in display order.
/// Override specific visit_* methods to act on the entries you care about.
pub trait Visitor: Sized {
    fn visit_layout(&mut self, layout: &Layout) {
        walk_layout(self, layout);
    }

    fn visit_section(&mut self, section: &Section) {
        walk_section(self, section);
    }

    fn visit_field(&mut self, _field: &Field) {
        // Leaf node, no children to walk
    }
}

/// Mutable visitor pattern for editing a layout in place
///
/// Implementations must not insert, remove or reorder entries; use the
/// editor's mutations for structural changes so `order` stays consistent.
pub trait VisitorMut: Sized {
    fn visit_layout_mut(&mut self, layout: &mut Layout) {
        walk_layout_mut(self, layout);
    }

    fn visit_section_mut(&mut self, section: &mut Section) {
        walk_section_mut(self, section);
    }

    fn visit_field_mut(&mut self, _field: &mut Field) {
        // Leaf node, no children to walk
    }
}

pub fn walk_layout<V: Visitor>(visitor: &mut V, layout: &Layout) {
    for section in &layout.sections {
        visitor.visit_section(section);
    }
}

pub fn walk_section<V: Visitor>(visitor: &mut V, section: &Section) {
    for field in &section.fields {
        visitor.visit_field(field);
    }
}

pub fn walk_layout_mut<V: VisitorMut>(visitor: &mut V, layout: &mut Layout) {
    for section in &mut layout.sections {
        visitor.visit_section_mut(section);
    }
}

pub fn walk_section_mut<V: VisitorMut>(visitor: &mut V, section: &mut Section) {
    for field in &mut section.fields {
        visitor.visit_field_mut(field);
    }
}
