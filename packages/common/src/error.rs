use thiserror::Error;

/// Common error type for host-facing glue (CLI, browser binding)
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

impl From<String> for CommonError {
    fn from(s: String) -> Self {
        CommonError::Generic(s)
    }
}

/// Result alias for host-facing glue
pub type CommonResult<T> = Result<T, CommonError>;
