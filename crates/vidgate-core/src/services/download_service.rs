//! Download service - orchestrates probe and download invocations.
//!
//! The service owns the two-step flow: probe the URL for a title so a
//! safe output path can be computed before any bytes are fetched, then
//! invoke the tool a second time to download and remux to that path.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::fs;

use tracing::{info, warn};

use crate::config::ServiceConfig;
use crate::domain::{DEFAULT_EXTENSION, VideoMetadata};
use crate::error::CoreError;
use crate::ports::VideoToolPort;
use crate::sanitize::sanitize_title;

/// Orchestration service for video downloads and metadata probes.
///
/// Stateless per request; safe to share behind an `Arc` across
/// concurrently handled requests. Concurrent downloads of identically
/// titled videos race on the same output path - callers accept that.
pub struct DownloadService {
    tool: Arc<dyn VideoToolPort>,
    config: ServiceConfig,
}

impl DownloadService {
    /// Create a new service with the given tool implementation.
    pub fn new(tool: Arc<dyn VideoToolPort>, config: ServiceConfig) -> Self {
        Self { tool, config }
    }

    /// Probe `url`, then download it into the downloads directory.
    ///
    /// Returns the path of the written file, named
    /// `<sanitized-title>.mp4`. The extension is constant regardless of
    /// what the probe reported: the download invocation always remuxes
    /// to mp4.
    ///
    /// On download failure any partially written file is removed before
    /// the error is returned.
    pub async fn process_video_download(&self, url: &str) -> Result<PathBuf, CoreError> {
        if url.is_empty() {
            return Err(CoreError::Validation(
                "video URL must not be empty".to_string(),
            ));
        }

        fs::create_dir_all(&self.config.downloads_dir)
            .await
            .map_err(|source| CoreError::Filesystem {
                path: self.config.downloads_dir.clone(),
                source,
            })?;

        let probe = self.tool.probe(url).await?.with_fallbacks();
        let file_name = format!("{}.{}", sanitize_title(&probe.title), DEFAULT_EXTENSION);
        let dest = self.config.downloads_dir.join(file_name);

        info!(
            target: "vidgate.download",
            url = %url,
            title = %probe.title,
            probed_ext = %probe.extension,
            path = %dest.display(),
            "starting video download"
        );

        if let Err(err) = self.tool.download(url, &dest).await {
            // The tool may have left a partial file behind.
            if let Err(rm) = fs::remove_file(&dest).await {
                if rm.kind() != std::io::ErrorKind::NotFound {
                    warn!(
                        target: "vidgate.download",
                        path = %dest.display(),
                        error = %rm,
                        "failed to remove partial download"
                    );
                }
            }
            return Err(err.into());
        }

        info!(target: "vidgate.download", path = %dest.display(), "video downloaded");
        Ok(dest)
    }

    /// Probe `url` for its title and thumbnail without downloading.
    ///
    /// Fails if the probe yields neither a title nor a thumbnail; the
    /// metadata response carries the raw probe values, not the filename
    /// fallbacks.
    pub async fn get_video_metadata(&self, url: &str) -> Result<VideoMetadata, CoreError> {
        if url.is_empty() {
            return Err(CoreError::Validation(
                "video URL must not be empty".to_string(),
            ));
        }

        let probe = self.tool.probe(url).await?;

        if probe.title.is_empty() && probe.thumbnail.is_empty() {
            return Err(CoreError::Internal(format!(
                "the downloader returned neither title nor thumbnail for {url}"
            )));
        }

        Ok(VideoMetadata {
            title: probe.title,
            thumbnail: probe.thumbnail,
            original_url: url.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProbeResult;
    use crate::ports::video_tool::MockVideoToolPort;
    use crate::ports::ToolError;

    fn probe_result(title: &str, ext: &str, thumbnail: &str) -> ProbeResult {
        ProbeResult {
            extension: ext.to_string(),
            title: title.to_string(),
            thumbnail: thumbnail.to_string(),
        }
    }

    fn service(tool: MockVideoToolPort, dir: &std::path::Path) -> DownloadService {
        DownloadService::new(
            Arc::new(tool),
            ServiceConfig::default().with_downloads_dir(dir),
        )
    }

    #[tokio::test]
    async fn empty_url_is_rejected_without_invoking_the_tool() {
        let mut tool = MockVideoToolPort::new();
        tool.expect_probe().never();
        tool.expect_download().never();
        let dir = tempfile::tempdir().unwrap();
        let svc = service(tool, dir.path());

        assert!(matches!(
            svc.process_video_download("").await,
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            svc.get_video_metadata("").await,
            Err(CoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn download_targets_sanitized_mp4_path() {
        let mut tool = MockVideoToolPort::new();
        tool.expect_probe()
            .returning(|_| Ok(probe_result("My Video", "webm", "")));
        tool.expect_download()
            .withf(|_, dest| dest.file_name().unwrap() == "My_Video.mp4")
            .returning(|_, _| Ok(()));
        let dir = tempfile::tempdir().unwrap();
        let svc = service(tool, dir.path());

        let path = svc
            .process_video_download("https://example.com/v1")
            .await
            .unwrap();
        assert_eq!(path, dir.path().join("My_Video.mp4"));
    }

    #[tokio::test]
    async fn empty_title_falls_back_to_default_name() {
        let mut tool = MockVideoToolPort::new();
        tool.expect_probe()
            .returning(|_| Ok(probe_result("", "", "")));
        tool.expect_download().returning(|_, _| Ok(()));
        let dir = tempfile::tempdir().unwrap();
        let svc = service(tool, dir.path());

        let path = svc
            .process_video_download("https://example.com/v1")
            .await
            .unwrap();
        assert_eq!(path, dir.path().join("video_descargado.mp4"));
    }

    #[tokio::test]
    async fn probe_failure_surfaces_tool_diagnostics() {
        let mut tool = MockVideoToolPort::new();
        tool.expect_probe().returning(|_| {
            Err(ToolError::Failed {
                stderr: "Unsupported URL".to_string(),
            })
        });
        tool.expect_download().never();
        let dir = tempfile::tempdir().unwrap();
        let svc = service(tool, dir.path());

        let err = svc
            .process_video_download("https://example.com/bad")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unsupported URL"));

        // Rebuild: the mock was consumed by the service above.
        let mut tool = MockVideoToolPort::new();
        tool.expect_probe().returning(|_| {
            Err(ToolError::Failed {
                stderr: "Unsupported URL".to_string(),
            })
        });
        let dir = tempfile::tempdir().unwrap();
        let svc = service(tool, dir.path());
        let err = svc
            .get_video_metadata("https://example.com/bad")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unsupported URL"));
    }

    #[tokio::test]
    async fn failed_download_removes_the_partial_file() {
        let mut tool = MockVideoToolPort::new();
        tool.expect_probe()
            .returning(|_| Ok(probe_result("Broken", "mp4", "")));
        tool.expect_download().returning(|_, dest| {
            // Simulate the tool writing some bytes before dying.
            std::fs::write(dest, b"partial").unwrap();
            Err(ToolError::Failed {
                stderr: "network reset".to_string(),
            })
        });
        let dir = tempfile::tempdir().unwrap();
        let svc = service(tool, dir.path());

        let err = svc
            .process_video_download("https://example.com/v1")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("network reset"));
        assert!(!dir.path().join("Broken.mp4").exists());
    }

    #[tokio::test]
    async fn metadata_returns_raw_probe_values() {
        let mut tool = MockVideoToolPort::new();
        tool.expect_probe().returning(|_| {
            Ok(probe_result(
                "My Video",
                "webm",
                "https://example.com/t.jpg",
            ))
        });
        let dir = tempfile::tempdir().unwrap();
        let svc = service(tool, dir.path());

        let meta = svc
            .get_video_metadata("https://example.com/v1")
            .await
            .unwrap();
        assert_eq!(meta.title, "My Video");
        assert_eq!(meta.thumbnail, "https://example.com/t.jpg");
        assert_eq!(meta.original_url, "https://example.com/v1");
    }

    #[tokio::test]
    async fn metadata_without_title_or_thumbnail_is_an_error() {
        let mut tool = MockVideoToolPort::new();
        tool.expect_probe()
            .returning(|_| Ok(probe_result("", "mp4", "")));
        let dir = tempfile::tempdir().unwrap();
        let svc = service(tool, dir.path());

        assert!(matches!(
            svc.get_video_metadata("https://example.com/v1").await,
            Err(CoreError::Internal(_))
        ));
    }
}
