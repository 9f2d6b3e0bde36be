//! Prototype paths: `/prototypes/{feature}/version/{id}`

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Slug of the built-in form builder feature
pub const FORM_BUILDER: &str = "form-builder";

const ROOT: &str = "prototypes";
const VERSION: &str = "version";

/// Why a path did not resolve to a prototype
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    #[error("Not a prototype path: {path} (expected /prototypes/{{feature}}/version/{{id}})")]
    MalformedPath { path: String },

    #[error("Unknown feature '{feature}'")]
    UnknownFeature { feature: String },

    #[error("Feature '{feature}' has no version '{version}'")]
    UnknownVersion { feature: String, version: String },
}

/// Parsed prototype address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    pub feature: String,
    pub version: String,
}

impl Route {
    pub fn new(feature: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            feature: feature.into(),
            version: version.into(),
        }
    }

    /// Parse a navigation path. A single trailing slash is tolerated.
    pub fn parse(path: &str) -> Result<Self, NotFound> {
        let malformed = || NotFound::MalformedPath {
            path: path.to_string(),
        };

        let trimmed = path.strip_suffix('/').unwrap_or(path);
        let rest = trimmed.strip_prefix('/').ok_or_else(malformed)?;
        let segments: Vec<&str> = rest.split('/').collect();

        match segments.as_slice() {
            [ROOT, feature, VERSION, version] if !feature.is_empty() && !version.is_empty() => {
                Ok(Self::new(*feature, *version))
            }
            _ => Err(malformed()),
        }
    }

    pub fn path(&self) -> String {
        format!("/{}/{}/{}/{}", ROOT, self.feature, VERSION, self.version)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
