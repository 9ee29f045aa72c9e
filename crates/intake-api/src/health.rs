//! `GET /health`

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use intake_core::{documents::DocumentStore, store::SubmissionStore};
use serde_json::json;

use crate::AppState;

pub async fn handler<S, D>(State(state): State<AppState<S, D>>) -> Response
where
  S: SubmissionStore,
  D: DocumentStore,
{
  match state.store.ping().await {
    Ok(()) => Json(json!({ "status": "up" })).into_response(),
    Err(e) => {
      tracing::error!(error = %e, "health check failed");
      (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "status": "down", "message": "database connection failed" })),
      )
        .into_response()
    }
  }
}
