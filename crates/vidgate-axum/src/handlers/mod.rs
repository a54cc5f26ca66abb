//! HTTP request handlers.
//!
//! Handlers are thin wrappers that validate the request shape and
//! delegate to the download service.

pub mod download;
pub mod metadata;
