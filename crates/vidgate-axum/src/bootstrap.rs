//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together:
//! the yt-dlp binary is resolved (downloaded if absent), the concrete
//! tool invoker is constructed and injected into the download service.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use vidgate_core::{DownloadService, ServiceConfig, VideoToolPort};
use vidgate_runtime::{YtDlpTool, ensure_ytdlp};

/// CORS configuration for the web server.
///
/// The service fronts a browser SPA, so permissive CORS is the default.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Directory where downloaded videos are written.
    pub downloads_dir: PathBuf,
    /// Directory where the yt-dlp binary is installed.
    pub tools_dir: PathBuf,
    /// Explicit yt-dlp binary path; skips the bootstrap download.
    pub ytdlp_path: Option<PathBuf>,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            downloads_dir: PathBuf::from("downloads"),
            tools_dir: PathBuf::from("tools"),
            ytdlp_path: None,
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Set the port to listen on.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the downloads directory.
    #[must_use]
    pub fn with_downloads_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.downloads_dir = dir.into();
        self
    }

    /// Use an already-installed yt-dlp binary instead of bootstrapping.
    #[must_use]
    pub fn with_ytdlp_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ytdlp_path = Some(path.into());
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// The download orchestration service.
    pub service: Arc<DownloadService>,
}

impl AxumContext {
    /// Build a context around an already-constructed service.
    ///
    /// Tests use this to inject a fake tool implementation.
    pub fn new(service: Arc<DownloadService>) -> Self {
        Self { service }
    }
}

/// Bootstrap the Axum server: ensure the downloader tool is installed
/// and assemble the download service around it.
pub async fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let ytdlp_path = match &config.ytdlp_path {
        Some(path) => {
            info!(target: "vidgate.bootstrap", path = %path.display(), "using provided yt-dlp binary");
            path.clone()
        }
        None => ensure_ytdlp(&config.tools_dir).await?,
    };

    let tool: Arc<dyn VideoToolPort> = Arc::new(YtDlpTool::new(ytdlp_path));
    let service = Arc::new(DownloadService::new(
        tool,
        ServiceConfig::default().with_downloads_dir(&config.downloads_dir),
    ));

    Ok(AxumContext::new(service))
}

/// Start the web server on the configured port.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;

    let ctx = bootstrap(&config).await?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("vidgate server listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
