use super::{found, registry, viewport_or};
use crate::config::Config;
use crate::outline::{print_outline, print_preview};
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct OpenArgs {
    /// Prototype path, e.g. /prototypes/form-builder/version/2
    pub path: String,

    /// Preview viewport (mobile, tablet, desktop or a width in px)
    #[arg(short, long)]
    pub viewport: Option<String>,
}

pub fn open(args: OpenArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let viewport = viewport_or(args.viewport.as_deref(), config.default_viewport)?;

    let registry = registry();
    let resolution = registry.resolve_path(&args.path);
    if !resolution.is_found() {
        println!("{} {}", "404".yellow().bold(), args.path);
    }
    let prototype = found(resolution)?;

    println!(
        "{} {} {}",
        "📋".bright_blue(),
        prototype.title.bold(),
        format!("({})", prototype.path()).dimmed()
    );
    if !prototype.summary.is_empty() {
        println!("   {}", prototype.summary);
    }
    println!();

    let session = prototype.instantiate(&args.path, config.history_limit);
    print_outline(session.layout());
    println!();
    print_preview(&session.preview(viewport));

    Ok(())
}
