//! TLS listener setup using rustls with certificate material from local
//! PEM files.
//!
//! The certificate chain and private key are read once at startup from the
//! configured paths. A missing or unparseable file aborts startup — there is
//! no plaintext fallback and no certificate rotation.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto;
use hyper_util::service::TowerToHyperService;
use rustls::ServerConfig;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tracing::{debug, warn};

/// Read the PEM-encoded certificate chain and private key from disk and
/// build a [`rustls::ServerConfig`].
///
/// # Errors
///
/// Returns an error if either file is absent or unreadable, if the PEM data
/// cannot be parsed, or if rustls rejects the configuration. All of these
/// are startup-fatal for the service.
pub fn load_server_config(cert_path: &Path, key_path: &Path) -> Result<Arc<ServerConfig>> {
    let cert_pem = std::fs::read(cert_path)
        .with_context(|| format!("failed to read TLS certificate {}", cert_path.display()))?;
    let key_pem = std::fs::read(key_path)
        .with_context(|| format!("failed to read TLS private key {}", key_path.display()))?;

    let certs = rustls_pemfile::certs(&mut std::io::BufReader::new(&cert_pem[..]))
        .collect::<Result<Vec<_>, _>>()
        .context("failed to parse TLS certificate chain")?;

    let key = rustls_pemfile::private_key(&mut std::io::BufReader::new(&key_pem[..]))
        .context("failed to read TLS private key")?
        .context("no private key found in PEM data")?;

    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .context("failed to build rustls ServerConfig")?;

    Ok(Arc::new(config))
}

/// Accept TLS connections on `addr` and serve `router` over HTTP/1.1 and
/// HTTP/2.
///
/// Runs until the process is killed; there is no graceful shutdown and no
/// connection draining. Handshake and per-connection errors are logged and
/// the accept loop continues.
///
/// # Errors
///
/// Returns an error only if the listener cannot be bound.
pub async fn serve(addr: SocketAddr, tls: Arc<ServerConfig>, router: Router) -> Result<()> {
    let acceptor = TlsAcceptor::from(tls);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(error = %e, "failed to accept connection");
                continue;
            }
        };

        let acceptor = acceptor.clone();
        let service = TowerToHyperService::new(router.clone());

        tokio::spawn(async move {
            let stream = match acceptor.accept(stream).await {
                Ok(s) => s,
                Err(e) => {
                    debug!(peer = %peer, error = %e, "TLS handshake failed");
                    return;
                }
            };

            if let Err(e) = auto::Builder::new(TokioExecutor::new())
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                debug!(peer = %peer, error = %e, "connection error");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_cert_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let cert = dir.path().join("absent.cert");
        let key = dir.path().join("absent.key");
        let result = load_server_config(&cert, &key);
        assert!(result.is_err());
    }

    #[test]
    fn missing_key_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let cert = dir.path().join("server.cert");
        std::fs::write(&cert, "irrelevant").unwrap();
        let result = load_server_config(&cert, &dir.path().join("absent.key"));
        assert!(result.is_err());
    }

    #[test]
    fn garbage_pem_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cert = dir.path().join("server.cert");
        let key = dir.path().join("server.key");
        std::fs::write(&cert, "not a pem").unwrap();
        std::fs::write(&key, "also not a pem").unwrap();
        let result = load_server_config(&cert, &key);
        assert!(result.is_err());
    }
}
