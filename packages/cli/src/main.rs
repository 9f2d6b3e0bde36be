mod commands;
mod config;
mod outline;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{init, open, preview, replay, routes, InitArgs, OpenArgs, PreviewArgs, ReplayArgs};
use tracing_subscriber::EnvFilter;

/// Formsmith CLI - responsive form layout builder
#[derive(Parser, Debug)]
#[command(name = "formsmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log builder decisions (rejected drags, skipped renames, history)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a formsmith.config.json in the current directory
    Init(InitArgs),

    /// List registered prototype paths
    Routes,

    /// Resolve a prototype path and show its starting layout
    Open(OpenArgs),

    /// Preview the configured prototype at a device width
    Preview(PreviewArgs),

    /// Run a JSON command script against the configured prototype
    Replay(ReplayArgs),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("FORMSMITH_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Routes => routes(),
        Command::Open(args) => open(args, &cwd),
        Command::Preview(args) => preview(args, &cwd),
        Command::Replay(args) => replay(args, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
