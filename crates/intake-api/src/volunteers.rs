//! Handlers for `/volunteer` and `/volunteers`.

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use chrono::Utc;
use intake_core::{
  IntakeError, documents::DocumentStore, record::Record, store::SubmissionStore,
  validate,
};

use crate::{
  AppState,
  error::ApiError,
  extract::{IdQuery, SubmittedFields},
};

/// `POST /volunteers`
pub async fn create<S, D>(
  State(state): State<AppState<S, D>>,
  SubmittedFields(fields): SubmittedFields,
) -> Result<impl IntoResponse, ApiError>
where
  S: SubmissionStore,
  D: DocumentStore,
{
  let submission = validate::volunteer(&fields, Utc::now())
    .inspect_err(|e| tracing::info!(error = %e, "volunteer rejected"))?;

  let id = state
    .store
    .insert_volunteer(submission.clone())
    .await
    .map_err(IntakeError::persistence)?;

  tracing::info!(id, "volunteer persisted");
  Ok((StatusCode::CREATED, Json(Record::new(id, submission))))
}

/// `GET /volunteers[?id=<n>]`
pub async fn read<S, D>(
  State(state): State<AppState<S, D>>,
  Query(query): Query<IdQuery>,
) -> Result<Response, ApiError>
where
  S: SubmissionStore,
  D: DocumentStore,
{
  match query.parse()? {
    None => {
      let volunteers = state.store.list_volunteers().await.map_err(ApiError::store)?;
      Ok(Json(volunteers).into_response())
    }
    Some(id) => {
      let volunteer = state
        .store
        .get_volunteer(id)
        .await
        .map_err(ApiError::store)?
        .ok_or_else(|| ApiError::NotFound(format!("volunteer {id}")))?;
      Ok(Json(volunteer).into_response())
    }
  }
}
