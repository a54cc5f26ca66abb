//! Core domain types and port definitions for vidgate.
//!
//! This crate holds everything the HTTP and subprocess adapters share:
//! the probe/download domain types, the `VideoToolPort` trait seam, the
//! orchestration service and filename sanitization. It has no knowledge
//! of axum, yt-dlp or the filesystem layout beyond the configured
//! downloads directory.

pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod sanitize;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ServiceConfig;
pub use domain::{DEFAULT_EXTENSION, FALLBACK_TITLE, ProbeResult, VideoMetadata};
pub use error::CoreError;
pub use ports::{ToolError, VideoToolPort};
pub use sanitize::sanitize_title;
pub use services::DownloadService;
