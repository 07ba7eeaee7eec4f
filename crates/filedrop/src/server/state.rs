//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::storage::Storage;

/// Application state shared across all request handlers.
///
/// Cheaply cloneable so Axum can clone it for each request.
#[derive(Clone)]
pub struct AppState {
    /// Storage directory uploads are written to.
    pub storage: Arc<Storage>,
    /// Maximum accepted upload size in bytes.
    pub max_upload_bytes: u64,
}

impl AppState {
    /// Create a new [`AppState`] for the given storage root and size limit.
    pub fn new(storage: Storage, max_upload_bytes: u64) -> Self {
        Self {
            storage: Arc::new(storage),
            max_upload_bytes,
        }
    }
}
