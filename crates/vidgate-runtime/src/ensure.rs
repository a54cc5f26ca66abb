//! yt-dlp binary bootstrap.
//!
//! Resolves the latest yt-dlp release tag from the GitHub API and
//! downloads the single-file binary for this platform into the tools
//! directory if it is not already there. Runs once at server startup.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use futures_util::StreamExt;
use reqwest::Client;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

const RELEASE_API_URL: &str = "https://api.github.com/repos/yt-dlp/yt-dlp/releases/latest";
const DOWNLOAD_URL_BASE: &str = "https://github.com/yt-dlp/yt-dlp/releases/download";

/// Known-good release used when the GitHub API is unreachable.
const FALLBACK_TAG: &str = "2024.12.06";

const USER_AGENT: &str = "vidgate";

/// GitHub API response for a release.
#[derive(Debug, Deserialize)]
struct GitHubRelease {
    tag_name: String,
}

/// Name of the yt-dlp single-file binary for this platform.
#[must_use]
pub const fn ytdlp_binary_name() -> &'static str {
    if cfg!(windows) { "yt-dlp.exe" } else { "yt-dlp" }
}

/// Fetch the latest yt-dlp release tag from GitHub.
async fn fetch_latest_release_tag(client: &Client) -> Result<String> {
    let response = client
        .get(RELEASE_API_URL)
        .header("User-Agent", USER_AGENT)
        .header("Accept", "application/vnd.github.v3+json")
        .send()
        .await
        .context("failed to fetch yt-dlp releases from GitHub")?;

    if !response.status().is_success() {
        bail!("GitHub API returned error: {}", response.status());
    }

    let release: GitHubRelease = response
        .json()
        .await
        .context("failed to parse GitHub release response")?;

    Ok(release.tag_name)
}

/// Stream a download to `dest`, removing the partial file on failure.
async fn download_to(client: &Client, url: &str, dest: &Path) -> Result<()> {
    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()
        .await
        .context("failed to start yt-dlp download")?;

    if !response.status().is_success() {
        bail!("yt-dlp download failed: HTTP {} ({url})", response.status());
    }

    let mut file = tokio::fs::File::create(dest)
        .await
        .with_context(|| format!("failed to create {}", dest.display()))?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                drop(file);
                let _ = tokio::fs::remove_file(dest).await;
                return Err(e).context("yt-dlp download interrupted");
            }
        };
        if let Err(e) = file.write_all(&chunk).await {
            drop(file);
            let _ = tokio::fs::remove_file(dest).await;
            return Err(e).with_context(|| format!("failed to write {}", dest.display()));
        }
    }
    file.flush().await?;
    Ok(())
}

/// Ensure a yt-dlp binary exists under `tools_dir`, downloading it if
/// necessary. Returns the path to the binary.
pub async fn ensure_ytdlp(tools_dir: &Path) -> Result<PathBuf> {
    tokio::fs::create_dir_all(tools_dir)
        .await
        .with_context(|| format!("failed to create tools directory {}", tools_dir.display()))?;

    let binary_path = tools_dir.join(ytdlp_binary_name());
    if binary_path.exists() {
        info!(target: "vidgate.bootstrap", path = %binary_path.display(), "yt-dlp already installed");
        return Ok(binary_path);
    }

    let client = Client::new();

    let tag = match fetch_latest_release_tag(&client).await {
        Ok(tag) => tag,
        Err(e) => {
            warn!(
                target: "vidgate.bootstrap",
                error = %e,
                fallback = FALLBACK_TAG,
                "could not resolve latest yt-dlp release, using pinned fallback"
            );
            FALLBACK_TAG.to_string()
        }
    };

    let url = format!("{DOWNLOAD_URL_BASE}/{tag}/{}", ytdlp_binary_name());
    info!(target: "vidgate.bootstrap", %tag, %url, "downloading yt-dlp");

    download_to(&client, &url, &binary_path).await?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(&binary_path, std::fs::Permissions::from_mode(0o755))
            .await
            .with_context(|| format!("failed to mark {} executable", binary_path.display()))?;
    }

    info!(target: "vidgate.bootstrap", path = %binary_path.display(), "yt-dlp installed");
    Ok(binary_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_name_matches_platform() {
        if cfg!(windows) {
            assert_eq!(ytdlp_binary_name(), "yt-dlp.exe");
        } else {
            assert_eq!(ytdlp_binary_name(), "yt-dlp");
        }
    }

    #[tokio::test]
    async fn existing_binary_is_returned_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join(ytdlp_binary_name());
        std::fs::write(&existing, b"stub").unwrap();

        let path = ensure_ytdlp(dir.path()).await.unwrap();
        assert_eq!(path, existing);
        // Untouched, not re-downloaded.
        assert_eq!(std::fs::read(&existing).unwrap(), b"stub");
    }
}
