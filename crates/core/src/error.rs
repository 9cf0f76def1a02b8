//! Error types for textrun.
//!
//! Segmentation itself is total; these errors only come from the surfaces
//! around it (loading page dumps, writing converted output).

use thiserror::Error;

/// Primary error type for loading and converting text runs.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("page {page} out of range (document has {count} pages)")]
    PageOutOfRange { page: usize, count: usize },

    #[error("invalid writing mode: {0}")]
    InvalidWritingMode(String),

    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

/// Convenience Result type alias for RunError.
pub type Result<T> = std::result::Result<T, RunError>;
