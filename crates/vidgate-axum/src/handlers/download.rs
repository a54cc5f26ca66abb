//! Download handler - POST /download.
//!
//! Streams the downloaded mp4 back to the client and deletes it from
//! disk once the response body has been served (or the client went
//! away). The return-path-as-JSON contract from earlier revisions is
//! deprecated and intentionally not supported.

use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures_util::Stream;
use serde::Deserialize;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

use crate::error::HttpError;
use crate::state::AppState;

/// Request body of POST /download.
///
/// `url` defaults to empty when absent so that a missing field produces
/// the same 400 as an explicitly empty one.
#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    #[serde(default)]
    pub url: String,
}

/// File stream that removes the file from disk when dropped.
///
/// Dropped when the response body is fully served or the connection is
/// aborted mid-transfer; either way the temp file must not linger.
struct ServeThenDelete {
    inner: ReaderStream<File>,
    path: PathBuf,
}

impl Stream for ServeThenDelete {
    type Item = std::io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

impl Drop for ServeThenDelete {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(
                target: "vidgate.download",
                path = %self.path.display(),
                "removed served video file"
            ),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                target: "vidgate.download",
                path = %self.path.display(),
                error = %e,
                "failed to remove served video file"
            ),
        }
    }
}

/// Download a video and stream it back as an mp4 attachment.
pub async fn download(
    State(state): State<AppState>,
    Json(req): Json<DownloadRequest>,
) -> Result<Response, HttpError> {
    if req.url.is_empty() {
        return Err(HttpError::BadRequest(
            "the 'url' field is required".to_string(),
        ));
    }

    let path = state.service.process_video_download(&req.url).await?;
    serve_and_delete(path).await
}

/// Build the streaming file response with download headers.
///
/// The request owns the downloaded file from here on: whether opening
/// it fails or the stream finishes, it must not linger on disk.
async fn serve_and_delete(path: PathBuf) -> Result<Response, HttpError> {
    let (file, len) = match open_for_streaming(&path).await {
        Ok(opened) => opened,
        Err(err) => {
            remove_video_file(&path).await;
            return Err(err);
        }
    };

    // Sanitized at download time, so always valid UTF-8 without quotes.
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("video.mp4")
        .to_owned();

    let disposition = match HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
    {
        Ok(value) => value,
        Err(e) => {
            remove_video_file(&path).await;
            return Err(HttpError::Internal(format!(
                "invalid download filename: {e}"
            )));
        }
    };

    let body = Body::from_stream(ServeThenDelete {
        inner: ReaderStream::new(file),
        path,
    });

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("video/mp4")),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CONTENT_LENGTH, HeaderValue::from(len)),
        ],
        body,
    )
        .into_response())
}

/// Open the downloaded file and read its size.
async fn open_for_streaming(path: &std::path::Path) -> Result<(File, u64), HttpError> {
    let file = File::open(path).await.map_err(|e| {
        HttpError::Internal(format!(
            "could not open downloaded video {}: {e}",
            path.display()
        ))
    })?;

    let len = file
        .metadata()
        .await
        .map_err(|e| {
            HttpError::Internal(format!(
                "could not stat downloaded video {}: {e}",
                path.display()
            ))
        })?
        .len();

    Ok((file, len))
}

/// Remove a downloaded video that will not be served after all.
async fn remove_video_file(path: &std::path::Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!(
            target: "vidgate.download",
            path = %path.display(),
            "removed unservable video file"
        ),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(
            target: "vidgate.download",
            path = %path.display(),
            error = %e,
            "failed to remove unservable video file"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_url_field_deserializes_to_empty() {
        let req: DownloadRequest = serde_json::from_str("{}").unwrap();
        assert!(req.url.is_empty());
    }

    #[test]
    fn url_field_is_parsed() {
        let req: DownloadRequest =
            serde_json::from_value(serde_json::json!({"url": "https://example.com/v1"})).unwrap();
        assert_eq!(req.url, "https://example.com/v1");
    }
}
