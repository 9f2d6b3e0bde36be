//! Registered builder prototypes

use crate::route::Route;
use formsmith_editor::{BuilderSession, Capabilities, SessionOptions};
use formsmith_layout::Layout;
use serde::Serialize;

/// One version of a feature's builder
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prototype {
    pub feature: String,
    pub version: String,
    pub title: String,
    pub summary: String,
    pub capabilities: Capabilities,
    /// Layout a fresh session starts from
    pub seed: Layout,
}

impl Prototype {
    pub fn new(
        feature: impl Into<String>,
        version: impl Into<String>,
        title: impl Into<String>,
        seed: Layout,
    ) -> Self {
        Self {
            feature: feature.into(),
            version: version.into(),
            title: title.into(),
            summary: String::new(),
            capabilities: Capabilities::all(),
            seed,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn route(&self) -> Route {
        Route::new(self.feature.clone(), self.version.clone())
    }

    pub fn path(&self) -> String {
        self.route().path()
    }

    /// Start an isolated builder session from the seed layout
    pub fn instantiate(&self, session_id: &str, history_limit: usize) -> BuilderSession {
        BuilderSession::with_options(
            session_id,
            self.seed.clone(),
            SessionOptions {
                history_limit,
                capabilities: self.capabilities,
            },
        )
    }
}
