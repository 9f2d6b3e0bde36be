//! # Responsive Preview
//!
//! Arranges a layout into grid rows for a device width so the builder can
//! show how the form reflows on phones, tablets and desktops.
//!
//! | Width | Columns |
//! |-------|---------|
//! | < 600px | 1 |
//! | < 1024px | 2 |
//! | otherwise | 3 |
//!
//! Collapsed sections contribute only their header. Full-row kinds
//! (textarea, signature) always start and end their own row.

use formsmith_layout::{FieldKind, Layout, Section};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Device width presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Viewport {
    /// Mobile: 375px (iPhone SE)
    Mobile,

    /// Tablet: 768px (iPad)
    Tablet,

    /// Desktop: 1280px
    Desktop,

    /// Custom width in pixels
    Custom(u32),
}

impl Viewport {
    pub fn width(&self) -> u32 {
        match self {
            Viewport::Mobile => 375,
            Viewport::Tablet => 768,
            Viewport::Desktop => 1280,
            Viewport::Custom(w) => *w,
        }
    }

    /// Grid columns available at this width
    pub fn columns(&self) -> usize {
        match self.width() {
            w if w < 600 => 1,
            w if w < 1024 => 2,
            _ => 3,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::Desktop
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Viewport::Mobile => f.write_str("mobile"),
            Viewport::Tablet => f.write_str("tablet"),
            Viewport::Desktop => f.write_str("desktop"),
            Viewport::Custom(w) => write!(f, "{}px", w),
        }
    }
}

impl FromStr for Viewport {
    type Err = String;

    /// Accepts `mobile`, `tablet`, `desktop`, or a width such as `900` / `900px`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mobile" => Ok(Viewport::Mobile),
            "tablet" => Ok(Viewport::Tablet),
            "desktop" => Ok(Viewport::Desktop),
            other => other
                .trim_end_matches("px")
                .parse::<u32>()
                .ok()
                .filter(|w| *w > 0)
                .map(Viewport::Custom)
                .ok_or_else(|| {
                    format!(
                        "Invalid viewport: {}. Use: mobile, tablet, desktop or a width in px",
                        s
                    )
                }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewCell {
    pub field_id: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Columns occupied
    pub span: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PreviewRow {
    pub cells: Vec<PreviewCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSection {
    pub section_id: String,
    pub name: String,
    pub expanded: bool,
    pub rows: Vec<PreviewRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewPage {
    pub viewport: Viewport,
    pub width: u32,
    pub columns: usize,
    pub sections: Vec<PreviewSection>,
}

impl PreviewPage {
    pub fn row_count(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }
}

/// Arrange `layout` for `viewport`
pub fn preview(layout: &Layout, viewport: Viewport) -> PreviewPage {
    let columns = viewport.columns();

    PreviewPage {
        viewport,
        width: viewport.width(),
        columns,
        sections: layout
            .sections
            .iter()
            .map(|section| arrange_section(section, columns))
            .collect(),
    }
}

fn arrange_section(section: &Section, columns: usize) -> PreviewSection {
    let mut rows = Vec::new();

    if section.is_expanded {
        let mut current = PreviewRow::default();

        for field in &section.fields {
            let full = field.kind.spans_full_row() || columns == 1;
            if full && !current.cells.is_empty() {
                rows.push(std::mem::take(&mut current));
            }

            current.cells.push(PreviewCell {
                field_id: field.id.clone(),
                label: field.label.clone(),
                kind: field.kind,
                required: field.is_required,
                span: if full { columns } else { 1 },
            });

            if full || current.cells.len() == columns {
                rows.push(std::mem::take(&mut current));
            }
        }

        if !current.cells.is_empty() {
            rows.push(current);
        }
    }

    PreviewSection {
        section_id: section.id.clone(),
        name: section.name.clone(),
        expanded: section.is_expanded,
        rows,
    }
}
