//! Machine keys for fields.
//!
//! A key is the snake_case form of a label. Keys are unique within one
//! section; collisions get a numeric suffix starting at `_2`.

use crate::model::Section;

/// Convert a label into a snake_case key. Falls back to `"field"` when the
/// label has no alphanumeric characters.
pub fn slugify(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_sep = false;

    for ch in label.chars() {
        if ch.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_sep = true;
        }
    }

    if out.is_empty() {
        "field".to_string()
    } else {
        out
    }
}

/// Pick a key based on `base` that no field in `section` uses, ignoring the
/// field identified by `except` (the field being re-keyed, if any).
pub fn unique_key(section: &Section, base: &str, except: Option<&str>) -> String {
    let taken = |candidate: &str| {
        section
            .fields
            .iter()
            .any(|f| f.key == candidate && Some(f.id.as_str()) != except)
    };

    if !taken(base) {
        return base.to_string();
    }

    let mut n = 2;
    loop {
        let candidate = format!("{}_{}", base, n);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, FieldKind};

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Meter Reading"), "meter_reading");
        assert_eq!(slugify("  E-mail (work) "), "e_mail_work");
        assert_eq!(slugify("Phone #2"), "phone_2");
        assert_eq!(slugify("---"), "field");
        assert_eq!(slugify(""), "field");
    }

    #[test]
    fn test_unique_key_suffixes() {
        let section = Section::new("s1", "Details").with_fields(vec![
            Field::new("f1", "Name", FieldKind::Text),
            Field::new("f2", "Name", FieldKind::Text).with_key("name_2"),
        ]);

        assert_eq!(unique_key(&section, "email", None), "email");
        assert_eq!(unique_key(&section, "name", None), "name_3");
    }

    #[test]
    fn test_unique_key_ignores_self() {
        let section = Section::new("s1", "Details")
            .with_fields(vec![Field::new("f1", "Name", FieldKind::Text)]);

        assert_eq!(unique_key(&section, "name", Some("f1")), "name");
    }
}
