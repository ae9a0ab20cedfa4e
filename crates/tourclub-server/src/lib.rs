//! Configuration and HTTP stack of the `tourclub` server binary.

use std::{path::Path, sync::Arc, time::Duration};

use axum::Router;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;
use tourclub_api::{AppState, api_router};
use tourclub_store_sqlite::SqliteStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Runtime server configuration.
///
/// Sources, lowest priority first: built-in defaults, the TOML file, then
/// `TOURCLUB_*` environment variables (e.g. `TOURCLUB_PORT=9000`).
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  /// Path of the SQLite database file.
  pub conn:               String,
  pub request_timeout_ms: u64,
  /// Allow cross-origin requests from any origin.
  pub cors_permissive:    bool,
}

impl ServerConfig {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::with_defaults(
      Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(Environment::with_prefix("TOURCLUB").try_parsing(true)),
    )
  }

  fn with_defaults(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
    builder
      .set_default("host", "0.0.0.0")?
      .set_default("port", 8080)?
      .set_default("conn", "tourclub.db")?
      .set_default("request_timeout_ms", 5000)?
      .set_default("cors_permissive", true)?
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn request_timeout(&self) -> Duration { Duration::from_millis(self.request_timeout_ms) }
}

/// The API router wrapped in request tracing and CORS.
pub fn app(store: Arc<SqliteStore>, cfg: &ServerConfig) -> Router {
  let cors = if cfg.cors_permissive { CorsLayer::permissive() } else { CorsLayer::new() };
  api_router(AppState::new(store, cfg.request_timeout()))
    .layer(TraceLayer::new_for_http())
    .layer(cors)
}
