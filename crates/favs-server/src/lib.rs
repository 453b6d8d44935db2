//! Server wiring for the favorites service: configuration and sample data.
//!
//! The binary in `main.rs` stitches these together with the router from
//! `favs-api` and an in-memory store.

pub mod seed;

use std::{path::Path, time::Duration};

use serde::Deserialize;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Layered, lowest precedence first: built-in defaults, the TOML file, `FAVS_*`
/// environment variables, then command-line overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:                  String,
  pub port:                  u16,
  /// Default `tracing` filter when `RUST_LOG` is unset.
  pub log_level:             String,
  /// Deadline for a single request; exceeded requests get `408`.
  pub request_timeout_secs:  u64,
  /// How long in-flight requests may run after a shutdown signal.
  pub shutdown_timeout_secs: u64,
  pub seed_sample_data:      bool,
}

impl ServerConfig {
  /// Load configuration from `path` (optional) and the environment, with
  /// `port_override` taking precedence over both.
  pub fn load(
    path: &Path,
    port_override: Option<u16>,
  ) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 8080_i64)?
      .set_default("log_level", "info")?
      .set_default("request_timeout_secs", 15_i64)?
      .set_default("shutdown_timeout_secs", 30_i64)?
      .set_default("seed_sample_data", true)?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("FAVS").try_parsing(true))
      .set_override_option("port", port_override.map(i64::from))?
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs)
  }

  pub fn shutdown_timeout(&self) -> Duration {
    Duration::from_secs(self.shutdown_timeout_secs)
  }
}
