use super::{found, registry, viewport_or};
use crate::config::Config;
use crate::outline::print_preview;
use anyhow::Result;
use clap::Args;
use formsmith_editor::Viewport;

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Viewport (mobile, tablet, desktop or a width in px)
    #[arg(short, long)]
    pub viewport: Option<String>,

    /// Render every preset viewport
    #[arg(long, conflicts_with = "viewport")]
    pub all: bool,
}

pub fn preview(args: PreviewArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let registry = registry();
    let prototype = found(registry.resolve(&config.prototype.route()))?;
    let session = prototype.instantiate("preview", config.history_limit);

    let viewports = if args.all {
        vec![Viewport::Mobile, Viewport::Tablet, Viewport::Desktop]
    } else {
        vec![viewport_or(args.viewport.as_deref(), config.default_viewport)?]
    };

    for (i, viewport) in viewports.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_preview(&session.preview(viewport));
    }

    Ok(())
}
