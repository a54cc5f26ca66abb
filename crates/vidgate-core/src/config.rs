//! Service configuration.

use std::path::PathBuf;

/// Default downloads directory, relative to the working directory.
pub const DEFAULT_DOWNLOADS_DIR: &str = "downloads";

/// Configuration for the download orchestration service.
///
/// Kept explicit (rather than embedded literals) so tests can point the
/// service at a temporary directory.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory where downloaded videos are written.
    pub downloads_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            downloads_dir: PathBuf::from(DEFAULT_DOWNLOADS_DIR),
        }
    }
}

impl ServiceConfig {
    /// Set the downloads directory.
    #[must_use]
    pub fn with_downloads_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.downloads_dir = dir.into();
        self
    }
}
