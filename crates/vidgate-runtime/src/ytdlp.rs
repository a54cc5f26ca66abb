//! yt-dlp invoker - the concrete `VideoToolPort` implementation.
//!
//! Two fixed argument templates: a metadata-only probe that prints one
//! JSON object to stdout, and a download that merges and remuxes to mp4
//! at an explicit output path. Both invocations are awaited to
//! completion with captured stdout/stderr; nothing is streamed.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use vidgate_core::domain::ProbeResult;
use vidgate_core::ports::{ToolError, VideoToolPort};

/// Format selection passed to the download invocation: prefer non-HEVC
/// mp4 video, fall back through plain mp4 to whatever is best.
const FORMAT_SELECTOR: &str = "bv*[ext=mp4][vcodec!=hevc][vcodec!=h265]/bv*[ext=mp4]/b[ext=mp4]/best";

/// Arguments for a metadata-only probe of `url`.
fn probe_args(url: &str) -> [&str; 4] {
    ["--print-json", "--flat-playlist", "--skip-download", url]
}

/// Arguments for downloading `url` to `dest` as mp4.
fn download_args(url: &str, dest: &Path) -> Vec<OsString> {
    vec![
        OsString::from("-f"),
        OsString::from(FORMAT_SELECTOR),
        OsString::from("--recode-video"),
        OsString::from("mp4"),
        OsString::from("--merge-output-format"),
        OsString::from("mp4"),
        OsString::from("-o"),
        dest.as_os_str().to_os_string(),
        OsString::from("--restrict-filenames"),
        OsString::from(url),
    ]
}

/// `VideoToolPort` implementation backed by a yt-dlp binary on disk.
pub struct YtDlpTool {
    binary: PathBuf,
}

impl YtDlpTool {
    /// Create an invoker for the binary at `binary`.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn trimmed_stderr(stderr: &[u8]) -> String {
        String::from_utf8_lossy(stderr).trim().to_string()
    }
}

#[async_trait]
impl VideoToolPort for YtDlpTool {
    async fn probe(&self, url: &str) -> Result<ProbeResult, ToolError> {
        debug!(target: "vidgate.ytdlp", url = %url, binary = %self.binary.display(), "probing");

        let output = Command::new(&self.binary)
            .args(probe_args(url))
            .output()
            .await
            .map_err(|e| ToolError::Spawn(e.to_string()))?;

        if !output.status.success() {
            return Err(ToolError::Failed {
                stderr: Self::trimmed_stderr(&output.stderr),
            });
        }

        serde_json::from_slice(&output.stdout).map_err(|e| ToolError::OutputParse(e.to_string()))
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<(), ToolError> {
        debug!(
            target: "vidgate.ytdlp",
            url = %url,
            dest = %dest.display(),
            "downloading"
        );

        let output = Command::new(&self.binary)
            .args(download_args(url, dest))
            .output()
            .await
            .map_err(|e| ToolError::Spawn(e.to_string()))?;

        if !output.status.success() {
            return Err(ToolError::Failed {
                stderr: Self::trimmed_stderr(&output.stderr),
            });
        }
        Ok(())
    }
}
