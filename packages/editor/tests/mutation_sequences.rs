//! Tests for longer interaction sequences
//!
//! This tests:
//! - Move + rename + delete chains
//! - Undo/redo across mixed actions
//! - History limits
//! - Layout integrity after every step

use formsmith_editor::{
    BuilderSession, Capabilities, DragHandler, DragLocation, DragResult, EditTarget, FieldKind,
    Layout, Mutation, Section, SessionOptions,
};

fn two_sections() -> Layout {
    Layout::from_sections(vec![Section::new("a", "A"), Section::new("b", "B")])
}

#[test]
fn test_move_rename_delete_chain() {
    let mut session = BuilderSession::new("seq", two_sections());
    let email = session.add_field("a", "Email", FieldKind::Email).unwrap();
    let phone = session.add_field("a", "Phone", FieldKind::Phone).unwrap();

    session.on_drag_end(&DragResult::new(
        email.clone(),
        DragLocation::section("a", 0),
        Some(DragLocation::section("b", 0)),
    ));
    assert!(session.layout().is_consistent());

    session.begin_edit(EditTarget::Field(email.clone()));
    session.set_edit_draft("Work email");
    session.commit_edit();

    session.apply(Mutation::RemoveSection {
        section_id: "b".to_string(),
    });
    assert!(session.layout().field(&email).is_none());
    assert_eq!(session.layout().field(&phone).unwrap().order, 0);

    // Undo delete restores the renamed field in its new section
    session.undo();
    let restored = session.layout().field(&email).unwrap();
    assert_eq!(restored.label, "Work email");
    assert_eq!(restored.section_id, "b");

    // Undo rename, then undo move
    session.undo();
    assert_eq!(session.layout().field(&email).unwrap().label, "Email");
    session.undo();
    assert_eq!(session.layout().field(&email).unwrap().section_id, "a");
    assert_eq!(session.layout().field(&email).unwrap().order, 0);
}

#[test]
fn test_moved_field_key_is_made_unique() {
    let mut session = BuilderSession::new("seq", two_sections());
    let first = session.add_field("a", "Name", FieldKind::Text).unwrap();
    session.add_field("b", "Name", FieldKind::Text).unwrap();

    session.apply(Mutation::MoveField {
        field_id: first.clone(),
        to_section: "b".to_string(),
        index: 5,
    });

    let moved = session.layout().field(&first).unwrap();
    assert_eq!(moved.key, "name_2");
    assert_eq!(moved.order, 1);
}

#[test]
fn test_new_action_after_undo_drops_redo() {
    let mut session = BuilderSession::new("seq", two_sections());
    session.add_section("C");
    session.add_section("D");

    session.undo();
    assert!(session.can_redo());

    session.add_section("E");
    assert!(!session.can_redo());
    let names: Vec<_> = session.layout().sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C", "E"]);
}

#[test]
fn test_history_limit_drops_oldest() {
    let options = SessionOptions {
        history_limit: 50,
        capabilities: Capabilities::all(),
    };
    let mut session = BuilderSession::with_options("seq", two_sections(), options);

    for i in 0..51 {
        session.add_section(&format!("S{}", i));
    }
    assert_eq!(session.history().len(), 50);

    let mut undone = 0;
    while session.can_undo() {
        session.undo();
        undone += 1;
    }
    assert_eq!(undone, 50);
    // The first addition can no longer be undone
    assert_eq!(session.layout().sections.len(), 3);
    assert_eq!(session.layout().sections[2].name, "S0");
}

#[test]
fn test_ids_are_never_reused_after_undo() {
    let mut session = BuilderSession::new("seq", two_sections());
    let first = session.add_field("a", "One", FieldKind::Text).unwrap();
    session.undo();
    let second = session.add_field("a", "One", FieldKind::Text).unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_every_step_keeps_layout_consistent() {
    let mut session = BuilderSession::new("seq", two_sections());
    let mut fields = Vec::new();
    for (i, kind) in FieldKind::ALL.iter().enumerate() {
        let section = if i % 2 == 0 { "a" } else { "b" };
        fields.push(session.add_field(section, &kind.to_string(), *kind).unwrap());
    }

    for (i, id) in fields.iter().enumerate() {
        let to = if i % 3 == 0 { "b" } else { "a" };
        session.apply(Mutation::MoveField {
            field_id: id.clone(),
            to_section: to.to_string(),
            index: i % 4,
        });
        assert!(session.layout().is_consistent());
    }

    assert_eq!(session.layout().field_count(), FieldKind::ALL.len());
    while session.can_undo() {
        session.undo();
        assert!(session.layout().is_consistent());
    }
    assert_eq!(session.layout().field_count(), 0);
}
