//! Core error taxonomy.

use std::path::PathBuf;

use thiserror::Error;

use crate::ports::ToolError;

/// Errors produced by the orchestration service.
///
/// Every failure is terminal for the request: the service never retries
/// and never returns partial success.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid input from the caller (empty URL).
    #[error("{0}")]
    Validation(String),

    /// The external downloader tool failed.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// A filesystem operation failed.
    #[error("filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Anything else that should never reach the client as a 4xx.
    #[error("{0}")]
    Internal(String),
}
