//! `filedrop` — HTTPS file-upload service binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Ensure the storage directory exists.
//! 4. Load the TLS certificate and private key (fatal if either is missing).
//! 5. Build the Axum router and start the TLS accept loop.

mod config;
mod server;
mod storage;
mod telemetry;
mod validate;

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use config::Config;
use server::state::AppState;
use storage::Storage;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cfg.port,
        storage_dir = %cfg.storage_dir,
        "filedrop starting"
    );

    // -----------------------------------------------------------------------
    // 3. Storage directory
    // -----------------------------------------------------------------------
    let storage = Storage::new(&cfg.storage_dir);
    storage.ensure_root().await.with_context(|| {
        format!("failed to create storage directory {}", cfg.storage_dir)
    })?;

    // -----------------------------------------------------------------------
    // 4. TLS material — no plaintext fallback, no retry.
    // -----------------------------------------------------------------------
    let tls = server::tls::load_server_config(
        Path::new(&cfg.tls_cert_path),
        Path::new(&cfg.tls_key_path),
    )?;

    // -----------------------------------------------------------------------
    // 5. HTTPS server
    // -----------------------------------------------------------------------
    let state = AppState::new(storage, cfg.max_upload_bytes);
    let router = server::router::build(state);

    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    info!(addr = %addr, "listening");

    server::tls::serve(addr, tls, router).await
}
