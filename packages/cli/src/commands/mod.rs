pub mod init;
pub mod open;
pub mod preview;
pub mod replay;
pub mod routes;

pub use init::{init, InitArgs};
pub use open::{open, OpenArgs};
pub use preview::{preview, PreviewArgs};
pub use replay::{replay, ReplayArgs};
pub use routes::routes;

use anyhow::{anyhow, Result};
use formsmith_editor::Viewport;
use formsmith_registry::{Prototype, Registry, Resolution};

/// Parse a `--viewport` value, falling back to the configured default
pub(crate) fn viewport_or(arg: Option<&str>, default: Viewport) -> Result<Viewport> {
    match arg {
        Some(value) => value.parse::<Viewport>().map_err(|e| anyhow!(e)),
        None => Ok(default),
    }
}

pub(crate) fn found<'a>(resolution: Resolution<'a>) -> Result<&'a Prototype> {
    match resolution {
        Resolution::Found(prototype) => Ok(prototype),
        Resolution::NotFound(reason) => Err(anyhow!("Prototype not found: {}", reason)),
    }
}

pub(crate) fn registry() -> Registry {
    Registry::builtin()
}
