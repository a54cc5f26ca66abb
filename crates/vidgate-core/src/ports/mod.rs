//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core domain expects from
//! infrastructure. They contain no implementation details and use only
//! domain types; the concrete yt-dlp invoker lives in vidgate-runtime.

pub mod video_tool;

pub use video_tool::{ToolError, VideoToolPort};
