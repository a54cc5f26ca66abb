//! Infrastructure adapters for vidgate.
//!
//! Implements the core `VideoToolPort` by shelling out to yt-dlp, and
//! provides the bootstrap that fetches the yt-dlp binary from its GitHub
//! releases when it is not already installed.

pub mod ensure;
pub mod ytdlp;

pub use ensure::{ensure_ytdlp, ytdlp_binary_name};
pub use ytdlp::YtDlpTool;
