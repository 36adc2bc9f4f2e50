//! Process wiring for the rolebook HTTP service: configuration loading and
//! application assembly.

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use rolebook_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://rolebook.db";

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  /// Connection string; see [`rolebook_store_sqlite::Location::parse`].
  pub database_url: String,
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Explicit overrides, normally taken from the command line and
/// `DATABASE_URL`. They win over every other source.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
  pub host:         Option<String>,
  pub port:         Option<u16>,
  pub database_url: Option<String>,
}

/// Layer defaults, an optional TOML file, `ROLEBOOK_*` environment variables
/// and `overrides`, in increasing order of precedence.
pub fn load_config(
  file: Option<PathBuf>,
  overrides: Overrides,
) -> Result<ServerConfig, config::ConfigError> {
  let mut builder = config::Config::builder()
    .set_default("host", DEFAULT_HOST)?
    .set_default("port", i64::from(DEFAULT_PORT))?
    .set_default("database_url", DEFAULT_DATABASE_URL)?;

  if let Some(path) = file {
    builder = builder.add_source(config::File::from(path).required(false));
  }

  builder
    .add_source(config::Environment::with_prefix("ROLEBOOK"))
    .set_override_option("host", overrides.host)?
    .set_override_option("port", overrides.port.map(i64::from))?
    .set_override_option("database_url", overrides.database_url)?
    .build()?
    .try_deserialize()
}

// ─── Application ──────────────────────────────────────────────────────────────

/// The API router wrapped with request tracing.
pub fn app(store: SqliteStore) -> Router {
  rolebook_api::api_router(Arc::new(store)).layer(TraceLayer::new_for_http())
}
