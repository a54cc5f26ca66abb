//! Axum web adapter for vidgate.
//!
//! Routes, handlers and HTTP error mapping over the core download
//! service, plus the composition root that wires the yt-dlp runtime in.

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export primary types
pub use bootstrap::{AxumContext, CorsConfig, ServerConfig, bootstrap, start_server};
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;
