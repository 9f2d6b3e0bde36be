use formsmith_editor::{Viewport, DEFAULT_HISTORY_LIMIT};
use formsmith_registry::{Route, FORM_BUILDER};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "formsmith.config.json";

/// Formsmith configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Undo steps kept per session (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Viewport used when a command is not given one
    #[serde(default)]
    pub default_viewport: Viewport,

    /// Prototype that `preview` and `replay` run against
    #[serde(default)]
    pub prototype: PrototypeRef,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrototypeRef {
    pub feature: String,
    pub version: String,
}

impl PrototypeRef {
    pub fn route(&self) -> Route {
        Route::new(self.feature.clone(), self.version.clone())
    }
}

impl Default for PrototypeRef {
    fn default() -> Self {
        Self {
            feature: FORM_BUILDER.to_string(),
            version: "3".to_string(),
        }
    }
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = Self::path(cwd);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!("loaded {}", config_path.display());
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn path(cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            default_viewport: Viewport::default(),
            prototype: PrototypeRef::default(),
        }
    }
}
