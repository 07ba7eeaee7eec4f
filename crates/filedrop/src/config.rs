//! Configuration loading and validation for the upload service.
//!
//! All values are read from environment variables at startup. The process
//! will exit with a clear error message if any value is missing or invalid.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Port the HTTPS server listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory uploaded files are written to. Created on startup if missing.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    /// Filesystem path to the PEM-encoded TLS certificate chain.
    #[serde(default = "default_tls_cert_path")]
    pub tls_cert_path: String,

    /// Filesystem path to the PEM-encoded TLS private key.
    #[serde(default = "default_tls_key_path")]
    pub tls_key_path: String,

    /// Maximum accepted upload size in bytes. Uploads exceeding this are
    /// rejected mid-stream and nothing is left on disk.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_port() -> u16 {
    3000
}
fn default_storage_dir() -> String {
    "uploads".into()
}
fn default_tls_cert_path() -> String {
    "server.cert".into()
}
fn default_tls_key_path() -> String {
    "server.key".into()
}
fn default_max_upload_bytes() -> u64 {
    5_000_000_000
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.storage_dir, "STORAGE_DIR")?;
        ensure_non_empty(&self.tls_cert_path, "TLS_CERT_PATH")?;
        ensure_non_empty(&self.tls_key_path, "TLS_KEY_PATH")?;

        if self.max_upload_bytes == 0 {
            anyhow::bail!("MAX_UPLOAD_BYTES must be > 0");
        }
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            port: default_port(),
            storage_dir: default_storage_dir(),
            tls_cert_path: default_tls_cert_path(),
            tls_key_path: default_tls_key_path(),
            max_upload_bytes: default_max_upload_bytes(),
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_port(), 3000);
        assert_eq!(default_storage_dir(), "uploads");
        assert_eq!(default_tls_cert_path(), "server.cert");
        assert_eq!(default_tls_key_path(), "server.key");
        assert_eq!(default_max_upload_bytes(), 5_000_000_000);
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn default_config_is_valid() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_storage_dir() {
        let mut cfg = base_config();
        cfg.storage_dir = "  ".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_tls_paths() {
        let mut cfg = base_config();
        cfg.tls_cert_path = "".into();
        assert!(cfg.validate().is_err());

        let mut cfg = base_config();
        cfg.tls_key_path = "".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_upload_limit() {
        let mut cfg = base_config();
        cfg.max_upload_bytes = 0;
        assert!(cfg.validate().is_err());
    }
}
