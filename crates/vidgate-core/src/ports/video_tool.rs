//! Video tool port definition.
//!
//! This port abstracts the external command-line downloader so the
//! orchestration service can be tested with a fake implementation
//! instead of invoking a real binary.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ProbeResult;

/// Errors from invoking the external downloader tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The tool process could not be started at all.
    #[error("failed to run the downloader: {0}")]
    Spawn(String),

    /// The tool exited nonzero; `stderr` carries its diagnostic text.
    #[error("the downloader reported an error: {stderr}")]
    Failed { stderr: String },

    /// The tool's probe output was not the expected JSON object.
    #[error("could not parse the downloader's output: {0}")]
    OutputParse(String),
}

/// Capability interface over the external video downloader.
///
/// Both operations are single-shot: each call maps to exactly one
/// subprocess invocation that is awaited to completion. No timeout is
/// applied; a hung tool hangs the calling request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoToolPort: Send + Sync {
    /// Probe `url` for metadata without fetching the video itself.
    async fn probe(&self, url: &str) -> Result<ProbeResult, ToolError>;

    /// Download the video at `url`, merging and remuxing to mp4 at `dest`.
    ///
    /// On success a file exists at `dest`. On failure the implementation
    /// makes no cleanup promises; the caller removes partial output.
    async fn download(&self, url: &str, dest: &Path) -> Result<(), ToolError>;
}
