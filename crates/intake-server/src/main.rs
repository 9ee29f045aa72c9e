//! intake server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered under
//! `INTAKE_*` environment variables, opens the SQLite store, loads the Drive
//! service-account key and serves the HTTP API until SIGINT/SIGTERM.

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context as _;
use clap::Parser;
use intake_api::AppState;
use intake_core::{RegistrationIntake, retry::RetryPolicy};
use intake_drive::{DriveClient, ServiceAccountKey};
use intake_server::{ServerConfig, app, cors_layer, expand_tilde};
use intake_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Candidate and volunteer intake server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let cfg = ServerConfig::load(&cli.config).context("failed to load configuration")?;
  anyhow::ensure!(
    !cfg.drive_folder_id.trim().is_empty(),
    "drive_folder_id must not be empty"
  );

  // Open SQLite store.
  let store_path = expand_tilde(&cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let store = Arc::new(store);

  // Document host.
  let credentials_path = expand_tilde(&cfg.drive_credentials_path);
  let key = ServiceAccountKey::from_file(&credentials_path)
    .context("failed to load drive service-account key")?;
  let drive = DriveClient::new(&cfg.drive_api_base, key)
    .context("failed to build drive client")?;

  let intake =
    RegistrationIntake::new(store.clone(), Arc::new(drive), cfg.drive_folder_id.clone())
      .with_retry(RetryPolicy::with_unit(Duration::from_millis(
        cfg.permission_retry_unit_ms,
      )));
  let state = AppState::new(store, intake).with_max_upload_bytes(cfg.max_upload_bytes);

  let cors = cors_layer(&cfg.allowed_origins).context("invalid allowed origin")?;
  let app = app(state, cors);
  let address = cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("server stopped");
  Ok(())
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(error = %e, "cannot listen for ctrl-c");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    use tokio::signal::unix::{SignalKind, signal};
    match signal(SignalKind::terminate()) {
      Ok(mut sigterm) => {
        sigterm.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "cannot listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    () = ctrl_c => {},
    () = terminate => {},
  }
  tracing::info!("shutdown signal received, draining connections");
}
