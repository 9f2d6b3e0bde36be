//! Starting layouts for the built-in prototypes

use formsmith_layout::{Field, FieldKind, FieldOption, Layout, Section};

fn form_details() -> Section {
    Section::new("form_details", "Form Details").system().with_fields(vec![
        Field::new("form_id", "Form ID", FieldKind::Text)
            .system()
            .required(),
        Field::new("submitted_at", "Submitted At", FieldKind::Date)
            .system()
            .required(),
    ])
}

fn contact() -> Section {
    Section::new("contact", "Contact").with_fields(vec![
        Field::new("first_name", "First Name", FieldKind::Text).required(),
        Field::new("last_name", "Last Name", FieldKind::Text).required(),
        Field::new("email", "Email", FieldKind::Email),
        Field::new("phone", "Phone", FieldKind::Phone),
    ])
}

/// Version 1: a small contact form
pub(crate) fn basic() -> Layout {
    Layout::from_sections(vec![form_details(), contact()])
}

/// Version 2 and later: a site inspection form with enough fields for
/// bulk actions to matter
pub(crate) fn inspection() -> Layout {
    Layout::from_sections(vec![
        form_details(),
        contact(),
        Section::new("site", "Site").with_fields(vec![
            Field::new("address", "Address", FieldKind::Textarea).required(),
            Field::new("site_type", "Site Type", FieldKind::Select).with_options(vec![
                FieldOption::new("residential", "Residential"),
                FieldOption::new("commercial", "Commercial"),
                FieldOption::new("industrial", "Industrial"),
            ]),
            Field::new("visit_date", "Visit Date", FieldKind::Date),
        ]),
        Section::new("readings", "Readings").with_fields(vec![
            Field::new("pressure", "Pressure", FieldKind::Number),
            Field::new("flow", "Flow", FieldKind::Number),
            Field::new("condition", "Condition", FieldKind::Radio).with_options(vec![
                FieldOption::new("good", "Good"),
                FieldOption::new("fair", "Fair"),
                FieldOption::new("poor", "Poor"),
            ]),
            Field::new("photos", "Photos", FieldKind::File),
        ]),
        Section::new("sign_off", "Sign-off")
            .collapsed()
            .with_fields(vec![
                Field::new("confirmed", "I confirm these readings", FieldKind::Checkbox)
                    .required(),
                Field::new("signature", "Signature", FieldKind::Signature).required(),
            ]),
    ])
}
