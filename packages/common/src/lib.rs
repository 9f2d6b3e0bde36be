pub mod error;
pub mod visitor;

pub use error::*;
pub use visitor::*;

use serde::de::DeserializeOwned;

/// Decode a JSON payload coming from a host (browser binding, script file)
pub fn decode_json<T: DeserializeOwned>(json: &str) -> CommonResult<T> {
    Ok(serde_json::from_str(json)?)
}
