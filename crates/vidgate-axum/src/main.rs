//! vidgate-server entry point.
//!
//! Initializes tracing, bootstraps the yt-dlp binary if needed and
//! starts the HTTP server.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vidgate_axum::{ServerConfig, start_server};

#[derive(Debug, Parser)]
#[command(name = "vidgate-server", about = "HTTP facade over yt-dlp")]
struct Args {
    /// Port to listen on.
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Directory where downloaded videos are written.
    #[arg(long, default_value = "downloads")]
    downloads_dir: PathBuf,

    /// Directory where the yt-dlp binary is installed.
    #[arg(long, default_value = "tools")]
    tools_dir: PathBuf,

    /// Use this yt-dlp binary instead of downloading one.
    #[arg(long)]
    ytdlp_path: Option<PathBuf>,

    /// Restrict CORS to these origins (default: allow all).
    #[arg(long)]
    allow_origin: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = ServerConfig::default()
        .with_port(args.port)
        .with_downloads_dir(args.downloads_dir);
    config.tools_dir = args.tools_dir;
    config.ytdlp_path = args.ytdlp_path;
    if !args.allow_origin.is_empty() {
        config = config.with_allowed_origins(args.allow_origin);
    }

    start_server(config).await
}
