//! Axum HTTPS server, routing, and TLS listener.
//!
//! # Responsibilities
//! - Load TLS material and run the accept loop (rustls + local PEM files).
//! - Define the Axum router with the upload and healthcheck routes.
//! - Inject shared application state (`AppState`) into handlers.

pub mod handlers;
pub mod router;
pub mod state;
pub mod tls;
