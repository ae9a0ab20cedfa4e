//! tourclub server binary.
//!
//! Reads `tourclub.toml` (or the path given with `--config`), opens the
//! SQLite store and serves the JSON API until SIGINT or SIGTERM.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::{net::TcpListener, signal};
use tourclub_server::{ServerConfig, app};
use tourclub_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Tourist club administration server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "tourclub.toml")]
  config: PathBuf,

  /// Listen port; overrides the configuration.
  #[arg(short, long)]
  port: Option<u16>,

  /// SQLite database path; overrides the configuration.
  #[arg(long)]
  conn: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;
  if let Some(port) = cli.port {
    cfg.port = port;
  }
  if let Some(conn) = cli.conn {
    cfg.conn = conn;
  }

  let store = SqliteStore::open(&cfg.conn)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.conn))?;
  let store = Arc::new(store);

  let address = cfg.address();
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Listening on http://{address}");

  axum::serve(listener, app(store.clone(), &cfg))
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  match Arc::try_unwrap(store) {
    Ok(store) => store.close().await.context("failed to close store")?,
    Err(_) => tracing::warn!("store still shared at shutdown; not closed explicitly"),
  }
  tracing::info!("stopped");
  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      tracing::error!(error = %e, "failed to listen for ctrl-c");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    use tokio::signal::unix::{SignalKind, signal};
    match signal(SignalKind::terminate()) {
      Ok(mut term) => {
        term.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }
  tracing::info!("shutting down");
}
