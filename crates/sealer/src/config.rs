//! Configuration loading and validation for the sealing service.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or invalid.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated sealing service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path of the base64 key file. **Required.**
    pub key_file: PathBuf,

    /// Generate and persist a fresh key when `key_file` does not exist.
    #[serde(default = "default_generate_key_if_missing")]
    pub generate_key_if_missing: bool,

    /// Socket address the HTTP server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// OTLP endpoint for span export. Spans stay local when unset.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_generate_key_if_missing() -> bool {
    true
}
fn default_listen_addr() -> String {
    "127.0.0.1:8787".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
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

    /// Parsed form of [`Config::listen_addr`].
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.listen_addr
            .parse()
            .with_context(|| format!("LISTEN_ADDR is not a socket address: {}", self.listen_addr))
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.key_file.as_os_str().is_empty() {
            anyhow::bail!("KEY_FILE is required and must not be empty");
        }
        self.socket_addr()?;
        if let Some(endpoint) = &self.otel_exporter_otlp_endpoint {
            if endpoint.trim().is_empty() {
                anyhow::bail!("OTEL_EXPORTER_OTLP_ENDPOINT must not be blank when set");
            }
        }
        Ok(())
    }
}
