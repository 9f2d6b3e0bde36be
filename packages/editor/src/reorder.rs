//! # Drag-Reorder Engine
//!
//! Pure computation of the layout that results from a completed drag.
//!
//! ## Semantics
//!
//! - Same container: the item is removed at `source.index` and reinserted
//!   at `destination.index`, then every sibling is renumbered
//! - Different containers: the item leaves the source list (siblings
//!   renumbered), enters the destination list (siblings renumbered) and its
//!   `section_id` is rewritten; a key clash in the destination is resolved
//!   with a numeric suffix
//! - Cancelled drops, stale events and system items leave the layout as is
//! - A destination index past the end of the list is clamped to the end

use crate::drag::DragResult;
use crate::mutations::MutationError;
use formsmith_layout::{unique_key, ContainerId, Layout};
use thiserror::Error;

/// Why a drop did not change the layout
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DropRejected {
    #[error("Drag cancelled or dropped outside a container")]
    Cancelled,

    #[error("Item dropped back where it started")]
    Unmoved,

    #[error("Unknown container: {0}")]
    UnknownContainer(ContainerId),

    #[error("Cannot move between {from} and {to}")]
    CrossKind { from: ContainerId, to: ContainerId },

    #[error("No item {id} at index {index} of {container}")]
    StaleSource {
        id: String,
        container: ContainerId,
        index: usize,
    },

    #[error("Item {0} is system-defined")]
    SystemItem(String),

    #[error(transparent)]
    Invalid(#[from] MutationError),
}

/// Compute the layout after a drop, or the reason it is a no-op
pub fn try_reorder(layout: &Layout, drag: &DragResult) -> Result<Layout, DropRejected> {
    let destination = drag.destination.as_ref().ok_or(DropRejected::Cancelled)?;
    let source = &drag.source;

    if destination == source {
        return Err(DropRejected::Unmoved);
    }

    let stale = || DropRejected::StaleSource {
        id: drag.draggable_id.clone(),
        container: source.container.clone(),
        index: source.index,
    };

    let mut next = layout.clone();
    let changed = match (&source.container, &destination.container) {
        (ContainerId::Sections, ContainerId::Sections) => {
            let section = layout
                .sections
                .get(source.index)
                .filter(|s| s.id == drag.draggable_id)
                .ok_or_else(stale)?;
            if section.is_system {
                return Err(DropRejected::SystemItem(section.id.clone()));
            }
            move_section(&mut next, &section.id, destination.index)?
        }

        (ContainerId::Section(from), ContainerId::Section(to)) => {
            let from_section = layout
                .section(from)
                .ok_or_else(|| DropRejected::UnknownContainer(source.container.clone()))?;
            if layout.section(to).is_none() {
                return Err(DropRejected::UnknownContainer(destination.container.clone()));
            }

            let field = from_section
                .fields
                .get(source.index)
                .filter(|f| f.id == drag.draggable_id)
                .ok_or_else(stale)?;
            if field.is_system_field {
                return Err(DropRejected::SystemItem(field.id.clone()));
            }
            move_field(&mut next, &field.id, to, destination.index)?
        }

        (from, to) => {
            return Err(DropRejected::CrossKind {
                from: from.clone(),
                to: to.clone(),
            })
        }
    };

    if changed {
        Ok(next)
    } else {
        Err(DropRejected::Unmoved)
    }
}

/// Compute the layout after a drop. Rejected drops return an unchanged copy.
pub fn reorder(layout: &Layout, drag: &DragResult) -> Layout {
    match try_reorder(layout, drag) {
        Ok(next) => next,
        Err(reason) => {
            tracing::debug!("drop of {} ignored: {}", drag.draggable_id, reason);
            layout.clone()
        }
    }
}

/// Move a field within or across sections, in place
pub(crate) fn move_field(
    layout: &mut Layout,
    field_id: &str,
    to_section: &str,
    index: usize,
) -> Result<bool, MutationError> {
    let (si, fi) = layout
        .locate_field(field_id)
        .ok_or_else(|| MutationError::FieldNotFound(field_id.to_string()))?;
    if layout.sections[si].fields[fi].is_system_field {
        return Err(MutationError::SystemField(field_id.to_string()));
    }
    let ti = layout
        .section_position(to_section)
        .ok_or_else(|| MutationError::SectionNotFound(to_section.to_string()))?;

    if si == ti {
        let section = &mut layout.sections[si];
        let dest = index.min(section.fields.len() - 1);
        if dest == fi {
            return Ok(false);
        }
        let field = section.fields.remove(fi);
        section.fields.insert(dest, field);
        section.renumber_fields();
        return Ok(true);
    }

    let mut field = layout.sections[si].fields.remove(fi);
    layout.sections[si].renumber_fields();

    let target = &mut layout.sections[ti];
    field.key = unique_key(target, &field.key, Some(&field.id));
    target.insert_field(index, field);
    Ok(true)
}

/// Move a section within the section list, in place
pub(crate) fn move_section(
    layout: &mut Layout,
    section_id: &str,
    index: usize,
) -> Result<bool, MutationError> {
    let from = layout
        .section_position(section_id)
        .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))?;
    if layout.sections[from].is_system {
        return Err(MutationError::SystemSection(section_id.to_string()));
    }

    let dest = index.min(layout.sections.len() - 1);
    if dest == from {
        return Ok(false);
    }
    let section = layout.sections.remove(from);
    layout.sections.insert(dest, section);
    layout.renumber_sections();
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::DragLocation;
    use formsmith_layout::{Field, FieldKind, Section};

    fn sample() -> Layout {
        Layout::from_sections(vec![
            Section::new("site", "Site").system().with_fields(vec![
                Field::new("site_id", "Site ID", FieldKind::Text).system(),
                Field::new("address", "Address", FieldKind::Textarea),
            ]),
            Section::new("readings", "Readings").with_fields(vec![
                Field::new("p", "P", FieldKind::Number),
                Field::new("q", "Q", FieldKind::Number),
            ]),
            Section::new("notes", "Notes"),
        ])
    }

    fn ids(layout: &Layout, section: &str) -> Vec<String> {
        layout
            .section(section)
            .unwrap()
            .fields
            .iter()
            .map(|f| f.id.clone())
            .collect()
    }

    #[test]
    fn test_same_container_reorder() {
        let layout = sample();
        let drag = DragResult::new(
            "p",
            DragLocation::section("readings", 0),
            Some(DragLocation::section("readings", 1)),
        );

        let next = try_reorder(&layout, &drag).unwrap();
        let section = next.section("readings").unwrap();
        assert_eq!(ids(&next, "readings"), vec!["q", "p"]);
        assert_eq!(section.fields[0].order, 0);
        assert_eq!(section.fields[1].order, 1);
        // input untouched
        assert_eq!(ids(&layout, "readings"), vec!["p", "q"]);
    }

    #[test]
    fn test_cross_container_move() {
        let layout = sample();
        let drag = DragResult::new(
            "q",
            DragLocation::section("readings", 1),
            Some(DragLocation::section("site", 1)),
        );

        let next = try_reorder(&layout, &drag).unwrap();
        assert_eq!(ids(&next, "site"), vec!["site_id", "q", "address"]);
        assert_eq!(ids(&next, "readings"), vec!["p"]);
        assert_eq!(next.field("q").unwrap().section_id, "site");
        assert!(next.is_consistent());
    }

    fn wide() -> Layout {
        let fields = (0..5)
            .map(|i| Field::new(format!("w{}", i), format!("W{}", i), FieldKind::Text))
            .collect();
        Layout::from_sections(vec![
            Section::new("wide", "Wide").with_fields(fields),
            Section::new("narrow", "Narrow").with_fields(vec![
                Field::new("n0", "N0", FieldKind::Text),
                Field::new("n1", "N1", FieldKind::Text),
            ]),
        ])
    }

    fn orders(layout: &Layout, section: &str) -> Vec<u32> {
        layout
            .section(section)
            .unwrap()
            .fields
            .iter()
            .map(|f| f.order)
            .collect()
    }

    #[test]
    fn test_every_same_section_move() {
        let layout = wide();
        let original = ids(&layout, "wide");
        let len = original.len();

        for source in 0..len {
            for destination in 0..len {
                let drag = DragResult::new(
                    original[source].clone(),
                    DragLocation::section("wide", source),
                    Some(DragLocation::section("wide", destination)),
                );
                let next = try_reorder(&layout, &drag).unwrap();
                let moved = ids(&next, "wide");

                let mut expected = original.clone();
                let item = expected.remove(source);
                expected.insert(destination, item);
                assert_eq!(moved, expected, "{} -> {}", source, destination);

                let mut sorted = moved.clone();
                sorted.sort();
                assert_eq!(sorted, original);
                assert_eq!(orders(&next, "wide"), (0..len as u32).collect::<Vec<_>>());
                assert_eq!(ids(&next, "narrow"), vec!["n0", "n1"]);
                assert!(next.is_consistent());
            }
        }
    }

    #[test]
    fn test_every_cross_section_move() {
        let layout = wide();
        let wide_ids = ids(&layout, "wide");
        let narrow_len = ids(&layout, "narrow").len();

        for (source, field_id) in wide_ids.iter().enumerate() {
            for destination in 0..=narrow_len {
                let drag = DragResult::new(
                    field_id.clone(),
                    DragLocation::section("wide", source),
                    Some(DragLocation::section("narrow", destination)),
                );
                let next = try_reorder(&layout, &drag).unwrap();

                let remaining = ids(&next, "wide");
                let received = ids(&next, "narrow");
                assert!(!remaining.contains(field_id));
                assert_eq!(remaining.len(), wide_ids.len() - 1);
                assert_eq!(received.len(), narrow_len + 1);
                assert_eq!(&received[destination], field_id);
                assert_eq!(next.field(field_id).unwrap().section_id, "narrow");
                assert_eq!(next.field_count(), layout.field_count());
                assert_eq!(
                    orders(&next, "wide"),
                    (0..remaining.len() as u32).collect::<Vec<_>>()
                );
                assert_eq!(
                    orders(&next, "narrow"),
                    (0..received.len() as u32).collect::<Vec<_>>()
                );
            }
        }
    }

    #[test]
    fn test_last_field_leaves_empty_section() {
        let layout = sample();
        let first = try_reorder(
            &layout,
            &DragResult::new(
                "p",
                DragLocation::section("readings", 0),
                Some(DragLocation::section("notes", 0)),
            ),
        )
        .unwrap();
        let second = try_reorder(
            &first,
            &DragResult::new(
                "q",
                DragLocation::section("readings", 0),
                Some(DragLocation::section("notes", 5)),
            ),
        )
        .unwrap();

        let readings = second.section("readings").unwrap();
        assert!(readings.fields.is_empty());
        assert_eq!(ids(&second, "notes"), vec!["p", "q"]);
    }

    #[test]
    fn test_cancelled_drop() {
        let layout = sample();
        let drag = DragResult::new("p", DragLocation::section("readings", 0), None);
        assert_eq!(try_reorder(&layout, &drag), Err(DropRejected::Cancelled));
        assert_eq!(reorder(&layout, &drag), layout);
    }

    #[test]
    fn test_system_field_rejected() {
        let layout = sample();
        let drag = DragResult::new(
            "site_id",
            DragLocation::section("site", 0),
            Some(DragLocation::section("readings", 0)),
        );
        assert_eq!(
            try_reorder(&layout, &drag),
            Err(DropRejected::SystemItem("site_id".to_string()))
        );
    }

    #[test]
    fn test_system_section_rejected() {
        let layout = sample();
        let drag = DragResult::new(
            "site",
            DragLocation::sections(0),
            Some(DragLocation::sections(2)),
        );
        assert_eq!(reorder(&layout, &drag), layout);
    }

    #[test]
    fn test_section_reorder() {
        let layout = sample();
        let drag = DragResult::new(
            "notes",
            DragLocation::sections(2),
            Some(DragLocation::sections(1)),
        );
        let next = try_reorder(&layout, &drag).unwrap();
        let names: Vec<_> = next.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(names, vec!["site", "notes", "readings"]);
        assert!(next.is_consistent());
    }

    #[test]
    fn test_stale_source_rejected() {
        let layout = sample();
        let drag = DragResult::new(
            "p",
            DragLocation::section("readings", 1),
            Some(DragLocation::section("readings", 0)),
        );
        assert!(matches!(
            try_reorder(&layout, &drag),
            Err(DropRejected::StaleSource { .. })
        ));
    }

    #[test]
    fn test_field_into_section_list_rejected() {
        let layout = sample();
        let drag = DragResult::new(
            "p",
            DragLocation::section("readings", 0),
            Some(DragLocation::sections(0)),
        );
        assert!(matches!(
            try_reorder(&layout, &drag),
            Err(DropRejected::CrossKind { .. })
        ));
    }

    #[test]
    fn test_unknown_destination_rejected() {
        let layout = sample();
        let drag = DragResult::new(
            "p",
            DragLocation::section("readings", 0),
            Some(DragLocation::section("gone", 0)),
        );
        assert_eq!(
            try_reorder(&layout, &drag),
            Err(DropRejected::UnknownContainer(ContainerId::Section("gone".into())))
        );
    }

    #[test]
    fn test_destination_past_end_is_clamped() {
        let layout = sample();
        let drag = DragResult::new(
            "p",
            DragLocation::section("readings", 0),
            Some(DragLocation::section("readings", 9)),
        );
        let next = try_reorder(&layout, &drag).unwrap();
        assert_eq!(ids(&next, "readings"), vec!["q", "p"]);
    }

    #[test]
    fn test_moved_field_key_uniquified() {
        let layout = Layout::from_sections(vec![
            Section::new("a", "A").with_fields(vec![Field::new("x", "Name", FieldKind::Text)]),
            Section::new("b", "B").with_fields(vec![Field::new("y", "Name", FieldKind::Text)]),
        ]);
        let drag = DragResult::new(
            "y",
            DragLocation::section("b", 0),
            Some(DragLocation::section("a", 1)),
        );
        let next = try_reorder(&layout, &drag).unwrap();
        assert_eq!(next.field("y").unwrap().key, "name_2");
        assert_eq!(next.field("x").unwrap().key, "name");
    }
}
