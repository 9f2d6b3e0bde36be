//! Terminal rendering of layouts and previews

use colored::Colorize;
use formsmith_common::{walk_section, Visitor};
use formsmith_editor::{BuilderSession, HistoryEntry, PreviewPage};
use formsmith_layout::{Field, Layout, Section};

/// Collects an indented text outline of a layout
#[derive(Default)]
struct OutlinePrinter {
    lines: Vec<String>,
}

impl Visitor for OutlinePrinter {
    fn visit_section(&mut self, section: &Section) {
        let marker = if section.is_expanded { "▾" } else { "▸" };
        let mut line = format!(
            "{} {} {}",
            marker,
            section.name.bold(),
            format!("({} fields)", section.fields.len()).dimmed()
        );
        if section.is_system {
            line.push_str(&format!(" {}", "[system]".cyan()));
        }
        self.lines.push(line);

        if section.is_expanded {
            walk_section(self, section);
        }
    }

    fn visit_field(&mut self, field: &Field) {
        let mut line = format!(
            "    {}. {} {} {}",
            field.order + 1,
            field.label,
            format!("<{}>", field.kind).dimmed(),
            field.key.dimmed()
        );
        if field.is_required {
            line.push_str(&format!(" {}", "*".red()));
        }
        if field.is_system_field {
            line.push_str(&format!(" {}", "[system]".cyan()));
        }
        self.lines.push(line);
    }
}

pub fn outline(layout: &Layout) -> Vec<String> {
    let mut printer = OutlinePrinter::default();
    printer.visit_layout(layout);
    printer.lines
}

pub fn print_outline(layout: &Layout) {
    for line in outline(layout) {
        println!("  {}", line);
    }
}

pub fn print_preview(page: &PreviewPage) {
    println!(
        "{} {} ({}px, {} column{})",
        "📱".bright_blue(),
        page.viewport.to_string().bold(),
        page.width,
        page.columns,
        if page.columns == 1 { "" } else { "s" }
    );

    for section in &page.sections {
        if !section.expanded {
            println!("  ▸ {}", section.name);
            continue;
        }

        println!("  ▾ {}", section.name);
        for row in &section.rows {
            let cells: Vec<String> = row
                .cells
                .iter()
                .map(|cell| {
                    let label = if cell.required {
                        format!("{}*", cell.label)
                    } else {
                        cell.label.clone()
                    };
                    if cell.span > 1 {
                        format!("{} ⟷", label)
                    } else {
                        label
                    }
                })
                .collect();
            println!("    │ {} │", cells.join(" │ "));
        }
    }
}

pub fn print_history(session: &BuilderSession) {
    let history = session.history();
    println!(
        "{} {} of {} steps applied",
        "🕘".bright_blue(),
        history.position(),
        history.len()
    );
    if let Some(entry) = history.undo_entry() {
        println!("   undo: {}", history_line(entry));
    }
    if let Some(entry) = history.redo_entry() {
        println!("   redo: {}", history_line(entry));
    }
}

fn history_line(entry: &HistoryEntry) -> String {
    format!(
        "{} {}",
        entry.description,
        format!("({})", entry.recorded_at.format("%H:%M:%S")).dimmed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith_layout::FieldKind;

    #[test]
    fn test_outline_hides_collapsed_fields() {
        colored::control::set_override(false);
        let layout = Layout::from_sections(vec![
            Section::new("a", "Contact").with_fields(vec![
                Field::new("e", "Email", FieldKind::Email).required(),
            ]),
            Section::new("b", "Notes")
                .collapsed()
                .with_fields(vec![Field::new("n", "Note", FieldKind::Textarea)]),
        ]);

        let lines = outline(&layout);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "▾ Contact (1 fields)");
        assert_eq!(lines[1], "    1. Email <email> email *");
        assert_eq!(lines[2], "▸ Notes (1 fields)");
    }

    #[test]
    fn test_history_line_shows_time() {
        colored::control::set_override(false);
        let mut session = BuilderSession::new("outline", Layout::default());
        session.add_section("Notes").unwrap();

        let entry = session.history().undo_entry().unwrap();
        let line = history_line(entry);
        let time = entry.recorded_at.format("%H:%M:%S").to_string();
        assert_eq!(line, format!("Added section \"Notes\" ({})", time));
    }
}
