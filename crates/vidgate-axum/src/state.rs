//! Shared application state type.

use std::sync::Arc;

use crate::bootstrap::AxumContext;

/// Application state shared across all handlers.
///
/// An Arc-wrapped [`AxumContext`] holding the download service.
pub type AppState = Arc<AxumContext>;
