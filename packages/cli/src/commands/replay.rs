use super::{found, registry, viewport_or};
use crate::config::Config;
use crate::outline::{print_history, print_outline, print_preview};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use formsmith_common::decode_json;
use formsmith_editor::{ApplyOutcome, BuilderSession, SessionCommand};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// JSON file holding an array of session commands
    pub script: PathBuf,

    /// Preview viewport (mobile, tablet, desktop or a width in px)
    #[arg(short, long)]
    pub viewport: Option<String>,
}

pub fn replay(args: ReplayArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let viewport = viewport_or(args.viewport.as_deref(), config.default_viewport)?;

    let source = fs::read_to_string(&args.script)
        .with_context(|| format!("Cannot read {}", args.script.display()))?;
    let commands: Vec<SessionCommand> = decode_json(&source)
        .with_context(|| format!("Invalid script {}", args.script.display()))?;

    let registry = registry();
    let prototype = found(registry.resolve(&config.prototype.route()))?;
    let mut session = prototype.instantiate("replay", config.history_limit);

    println!(
        "{} Replaying {} commands against {}",
        "▶".bright_blue(),
        commands.len(),
        prototype.path().cyan()
    );

    let summary = run_script(&mut session, commands);
    for (i, (label, outcome)) in summary.iter().enumerate() {
        println!("  {:>3}. {} {}", i + 1, outcome_marker(outcome), label);
    }

    println!();
    print_outline(session.layout());
    println!();
    print_history(&session);
    println!();
    print_preview(&session.preview(viewport));

    Ok(())
}

/// Dispatch every command, returning a label and outcome per step
pub(crate) fn run_script(
    session: &mut BuilderSession,
    commands: Vec<SessionCommand>,
) -> Vec<(String, ApplyOutcome)> {
    commands
        .into_iter()
        .map(|command| {
            let label = command_label(&command);
            let outcome = session.dispatch(command);
            tracing::debug!("{} -> {:?}", label, outcome);
            (label, outcome)
        })
        .collect()
}

fn command_label(command: &SessionCommand) -> String {
    serde_json::to_value(command)
        .ok()
        .and_then(|value| value.get("command").and_then(|c| c.as_str()).map(str::to_string))
        .unwrap_or_else(|| format!("{:?}", command))
}

fn outcome_marker(outcome: &ApplyOutcome) -> String {
    match outcome {
        ApplyOutcome::Applied => "✓".green().to_string(),
        ApplyOutcome::Unchanged => "·".dimmed().to_string(),
        ApplyOutcome::Ignored => "–".yellow().to_string(),
        ApplyOutcome::Rejected(err) => format!("{} {}", "✗".red(), err.to_string().red()),
        ApplyOutcome::Disabled(capability) => {
            format!("{} {:?} disabled", "⊘".yellow(), capability)
        }
    }
}
