//! Metadata handler - GET /metadata?url=...

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::error::HttpError;
use crate::state::AppState;
use vidgate_core::VideoMetadata;

/// Query parameters of GET /metadata.
#[derive(Debug, Deserialize)]
pub struct MetadataQuery {
    #[serde(default)]
    pub url: String,
}

/// Probe a video URL for title and thumbnail.
pub async fn get_metadata(
    State(state): State<AppState>,
    Query(query): Query<MetadataQuery>,
) -> Result<Json<VideoMetadata>, HttpError> {
    if query.url.is_empty() {
        return Err(HttpError::BadRequest(
            "the 'url' query parameter is required".to_string(),
        ));
    }

    let metadata = state.service.get_video_metadata(&query.url).await?;
    Ok(Json(metadata))
}
