use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The computation has no defined value for the given inputs.
    #[error("domain error: {0}")]
    Domain(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, EvalError>;
