use super::registry;
use anyhow::Result;
use colored::Colorize;

pub fn routes() -> Result<()> {
    let registry = registry();

    for feature in registry.features() {
        println!("{}", feature.slug.bright_blue().bold());
        for prototype in &feature.versions {
            let caps = prototype.capabilities;
            let flags: Vec<&str> = [
                (caps.drag_reorder, "drag"),
                (caps.inline_edit, "edit"),
                (caps.bulk_actions, "bulk"),
                (caps.history, "history"),
            ]
            .into_iter()
            .filter_map(|(enabled, name)| enabled.then_some(name))
            .collect();

            println!(
                "  {}  {} {}",
                prototype.path().cyan(),
                prototype.title.bold(),
                format!("[{}]", flags.join(", ")).dimmed()
            );
            if !prototype.summary.is_empty() {
                println!("      {}", prototype.summary);
            }
        }
    }

    Ok(())
}
