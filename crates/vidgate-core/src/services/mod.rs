//! Core services.

pub mod download_service;

pub use download_service::DownloadService;
