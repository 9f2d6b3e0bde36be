//! # Formsmith Layout
//!
//! In-memory data model for the form layout builder: an ordered list of
//! [`Section`]s, each owning an ordered list of [`Field`]s.
//!
//! Sibling `order` values are always contiguous and equal to list position.
//! Every helper in this crate that inserts, removes or moves an entry
//! renumbers the affected siblings before returning.

pub mod id_generator;
pub mod key;
pub mod model;

pub use id_generator::IdGenerator;
pub use key::{slugify, unique_key};
pub use model::{
    ContainerId, Field, FieldId, FieldKind, FieldOption, Layout, Section, SectionId,
};
