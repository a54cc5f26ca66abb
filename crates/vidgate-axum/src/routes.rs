//! Route definitions and router construction.
//!
//! A route registered with a single method makes axum answer other
//! methods with 405, which is exactly the contract: /download is
//! POST-only, /metadata is GET-only.

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
///
/// Origins that do not parse as header values are skipped with a
/// warning rather than failing startup.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match config {
        CorsConfig::AllowAll => layer.allow_origin(Any),
        CorsConfig::AllowOrigins(origins) => {
            let mut allowed: Vec<HeaderValue> = Vec::with_capacity(origins.len());
            for origin in origins {
                match origin.parse::<HeaderValue>() {
                    Ok(value) => allowed.push(value),
                    Err(_) => warn!(
                        target: "vidgate.http",
                        origin = %origin,
                        "skipping CORS origin that is not a valid header value"
                    ),
                }
            }
            layer.allow_origin(allowed)
        }
    }
}

/// Create the main Axum router.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .route("/download", post(handlers::download::download))
        .route("/metadata", get(handlers::metadata::get_metadata))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
