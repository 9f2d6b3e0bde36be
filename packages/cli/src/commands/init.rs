use crate::config::{Config, PrototypeRef, DEFAULT_CONFIG_NAME};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use formsmith_editor::Viewport;
use formsmith_registry::Registry;
use std::fs;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Prototype version to start from
    #[arg(long, default_value = "3")]
    pub version: String,

    /// Default preview viewport (mobile, tablet, desktop or a width in px)
    #[arg(long, default_value = "desktop")]
    pub viewport: String,

    /// Undo steps kept per session (0 = unlimited)
    #[arg(long, default_value_t = formsmith_editor::DEFAULT_HISTORY_LIMIT)]
    pub history_limit: usize,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = Config::path(cwd);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let prototype = PrototypeRef {
        version: args.version.clone(),
        ..PrototypeRef::default()
    };
    if !Registry::builtin().resolve(&prototype.route()).is_found() {
        return Err(anyhow!("Unknown prototype version: {}", args.version));
    }

    let config = Config {
        history_limit: args.history_limit,
        default_viewport: args.viewport.parse::<Viewport>().map_err(|e| anyhow!(e))?,
        prototype,
    };

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("Next steps:");
    println!("  1. Run: formsmith routes");
    println!("  2. Run: formsmith preview --viewport mobile");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(force: bool) -> InitArgs {
        InitArgs {
            version: "2".to_string(),
            viewport: "tablet".to_string(),
            history_limit: 20,
            force,
        }
    }

    #[test]
    fn test_init_writes_config() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().to_str().unwrap();

        init(args(false), cwd).unwrap();
        let config = Config::load(cwd).unwrap();
        assert_eq!(config.history_limit, 20);
        assert_eq!(config.default_viewport, Viewport::Tablet);
        assert_eq!(config.prototype.version, "2");
    }

    #[test]
    fn test_init_keeps_existing_without_force() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().to_str().unwrap();
        fs::write(Config::path(cwd), r#"{ "historyLimit": 7 }"#).unwrap();

        init(args(false), cwd).unwrap();
        assert_eq!(Config::load(cwd).unwrap().history_limit, 7);

        init(args(true), cwd).unwrap();
        assert_eq!(Config::load(cwd).unwrap().history_limit, 20);
    }

    #[test]
    fn test_init_rejects_unknown_version() {
        let dir = TempDir::new().unwrap();
        let mut bad = args(false);
        bad.version = "42".to_string();
        assert!(init(bad, dir.path().to_str().unwrap()).is_err());
        assert!(!Config::path(dir.path().to_str().unwrap()).exists());
    }
}
