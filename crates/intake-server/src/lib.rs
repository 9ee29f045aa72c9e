//! Server assembly for the intake service: configuration and the outer
//! middleware stack around [`intake_api::router`].

use std::path::{Path, PathBuf};

use axum::{
  Router,
  http::{
    HeaderValue, Method,
    header::{AUTHORIZATION, CONTENT_TYPE, InvalidHeaderValue},
  },
};
use intake_api::AppState;
use intake_core::{documents::DocumentStore, store::SubmissionStore};
use serde::Deserialize;
use tower_http::{
  cors::{AllowOrigin, CorsLayer},
  trace::TraceLayer,
};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime configuration, read from `config.toml` and `INTAKE_*` variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "defaults::host")]
  pub host:                     String,
  #[serde(default = "defaults::port")]
  pub port:                     u16,
  #[serde(default = "defaults::store_path")]
  pub store_path:               PathBuf,
  #[serde(default = "defaults::drive_credentials_path")]
  pub drive_credentials_path:   PathBuf,
  /// Folder every uploaded document is created in.
  pub drive_folder_id:          String,
  #[serde(default = "defaults::drive_api_base")]
  pub drive_api_base:           String,
  /// Backoff unit for the public-read grant retries.
  #[serde(default = "defaults::permission_retry_unit_ms")]
  pub permission_retry_unit_ms: u64,
  #[serde(default = "defaults::allowed_origins")]
  pub allowed_origins:          Vec<String>,
  #[serde(default = "defaults::max_upload_bytes")]
  pub max_upload_bytes:         u64,
}

mod defaults {
  use std::path::PathBuf;

  pub fn host() -> String { "0.0.0.0".to_string() }
  pub fn port() -> u16 { 8080 }
  pub fn store_path() -> PathBuf { PathBuf::from("intake.db") }
  pub fn drive_credentials_path() -> PathBuf {
    PathBuf::from("drive-credentials.json")
  }
  pub fn drive_api_base() -> String { intake_drive::DEFAULT_API_BASE.to_string() }
  pub fn permission_retry_unit_ms() -> u64 { 1000 }
  pub fn allowed_origins() -> Vec<String> {
    [
      "https://readytorun.vercel.app",
      "https://readytorunng.org",
      "http://localhost:8080",
    ]
    .map(String::from)
    .to_vec()
  }
  pub fn max_upload_bytes() -> u64 { intake_api::DEFAULT_MAX_UPLOAD_BYTES }
}

impl ServerConfig {
  /// Layer an optional TOML file under `INTAKE_*` environment variables.
  /// `INTAKE_ALLOWED_ORIGINS` is a comma-separated list.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("INTAKE")
          .try_parsing(true)
          .list_separator(",")
          .with_list_parse_key("allowed_origins"),
      )
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Middleware ──────────────────────────────────────────────────────────────

/// CORS for the browser front-ends: listed origins only, with credentials.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, InvalidHeaderValue> {
  let origins = origins
    .iter()
    .map(|o| HeaderValue::from_str(o))
    .collect::<Result<Vec<_>, _>>()?;

  Ok(
    CorsLayer::new()
      .allow_origin(AllowOrigin::list(origins))
      .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
      .allow_headers([CONTENT_TYPE, AUTHORIZATION])
      .allow_credentials(true),
  )
}

/// The complete application: API routes wrapped in CORS and request tracing.
pub fn app<S, D>(state: AppState<S, D>, cors: CorsLayer) -> Router
where
  S: SubmissionStore + 'static,
  D: DocumentStore + 'static,
{
  intake_api::router(state)
    .layer(cors)
    .layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
