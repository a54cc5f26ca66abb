//! Domain types for video probing and metadata.

use serde::{Deserialize, Serialize};

/// Extension used when the probe reports none.
///
/// The download invocation always remuxes to mp4, so this is also the
/// only extension the service ever writes.
pub const DEFAULT_EXTENSION: &str = "mp4";

/// Title used when the probe reports none.
pub const FALLBACK_TITLE: &str = "video_descargado";

/// Result of a metadata-only probe of a video URL.
///
/// Parsed from the downloader tool's single-line JSON output. The tool
/// emits many more fields; only these three matter here, and each may be
/// absent or empty depending on the extractor.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ProbeResult {
    /// Container extension as reported by the source (e.g. "mp4", "webm").
    #[serde(rename = "ext", default)]
    pub extension: String,
    /// Video title as reported by the source.
    #[serde(default)]
    pub title: String,
    /// Thumbnail URL, when the extractor provides one.
    #[serde(default)]
    pub thumbnail: String,
}

impl ProbeResult {
    /// Apply the documented fallbacks for empty probe fields.
    ///
    /// An empty extension becomes [`DEFAULT_EXTENSION`] and an empty title
    /// becomes [`FALLBACK_TITLE`]. The thumbnail is left as-is.
    #[must_use]
    pub fn with_fallbacks(mut self) -> Self {
        if self.extension.is_empty() {
            self.extension = DEFAULT_EXTENSION.to_string();
        }
        if self.title.is_empty() {
            self.title = FALLBACK_TITLE.to_string();
        }
        self
    }
}

/// Metadata returned to clients of the metadata endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    pub thumbnail: String,
    pub original_url: String,
}
