//! favs server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus `FAVS_*`
//! environment variables, builds an in-memory store, and serves the JSON API
//! over HTTP until interrupted.

use std::{future::IntoFuture as _, path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use favs_server::{ServerConfig, seed};
use favs_service::FavoritesService;
use favs_store_memory::MemoryStore;
use tokio::{net::TcpListener, sync::watch};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Favorites service")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Listen on this port instead of the configured one.
  #[arg(short, long)]
  port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config, cli.port)
    .context("failed to load configuration")?;

  // Initialise tracing; RUST_LOG wins over the configured level.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server_cfg.log_level))
        .context("invalid log level")?,
    )
    .init();

  tracing::info!(port = server_cfg.port, "starting favorites service");

  let store = Arc::new(MemoryStore::new());
  if server_cfg.seed_sample_data {
    seed::seed(store.as_ref()).await;
  }

  let app = favs_api::app(FavoritesService::new(store))
    .layer(TimeoutLayer::new(server_cfg.request_timeout()))
    .layer(TraceLayer::new_for_http());

  let address = server_cfg.address();
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Listening on http://{address}");

  let (stop_tx, stop_rx) = watch::channel(false);
  tokio::spawn(async move {
    shutdown_signal().await;
    tracing::info!("shutting down server");
    let _ = stop_tx.send(true);
  });

  let server = axum::serve(listener, app)
    .with_graceful_shutdown(stopped(stop_rx.clone()))
    .into_future();
  let grace = server_cfg.shutdown_timeout();

  tokio::select! {
    result = server => result.context("server error")?,
    () = async {
      stopped(stop_rx).await;
      tokio::time::sleep(grace).await;
    } => {
      tracing::warn!("in-flight requests did not finish in time; forcing shutdown");
    }
  }

  tracing::info!("server exited");
  Ok(())
}

/// Resolves once a shutdown has been requested.
async fn stopped(mut stop: watch::Receiver<bool>) {
  let _ = stop.wait_for(|requested| *requested).await;
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(error = %e, "failed to listen for Ctrl-C");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
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
    () = ctrl_c => {}
    () = terminate => {}
  }
}
