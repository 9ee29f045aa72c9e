//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use intake_core::{BoxError, IntakeError, ValidationError};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Intake(#[from] IntakeError),

  #[error("store error: {0}")]
  Store(#[source] BoxError),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("intake task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}

impl ApiError {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    ApiError::Store(Box::new(e))
  }

  pub fn malformed(message: impl Into<String>) -> Self {
    ApiError::Intake(IntakeError::MalformedRequest(message.into()))
  }
}

impl From<ValidationError> for ApiError {
  fn from(e: ValidationError) -> Self { ApiError::Intake(e.into()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let message = self.to_string();
    let (status, body) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "error": m })),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, json!({ "error": m })),
      ApiError::Intake(IntakeError::MalformedRequest(_)) => {
        (StatusCode::BAD_REQUEST, json!({ "error": message }))
      }
      ApiError::Intake(IntakeError::Validation(v)) => {
        let mut body = json!({ "error": message, "field": v.field() });
        if let ValidationError::InvalidEnumValue { allowed, .. } = v {
          body["allowed"] = json!(allowed);
        }
        (StatusCode::BAD_REQUEST, body)
      }
      ApiError::Intake(IntakeError::UploadFailed { slot, .. }) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": message, "field": slot.field_name() }),
      ),
      ApiError::Intake(IntakeError::PersistenceFailed(_))
      | ApiError::Store(_)
      | ApiError::Io(_)
      | ApiError::Task(_) => {
        (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message }))
      }
    };
    if status.is_server_error() {
      tracing::error!(%status, error = %message, "request failed");
    }
    (status, Json(body)).into_response()
  }
}
