//! Axum router construction.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::{handlers, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
///
/// The framework's default body limit is disabled on the upload route — the
/// handler enforces the configured byte cap itself while streaming.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route(
            "/upload",
            post(handlers::upload).layer(DefaultBodyLimit::disable()),
        )
        .route("/healthcheck", get(handlers::healthcheck))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
