//! Handlers for `/registration` and `/registrations`.
//!
//! Submissions are `multipart/form-data`. The file parts `partyCard` and
//! `resume` are optional; everything after body parsing is the intake
//! pipeline's job.

use axum::{
  Json,
  extract::{Multipart, Query, State, multipart::MultipartRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use intake_core::{documents::DocumentStore, store::SubmissionStore};

use crate::{
  AppState,
  error::ApiError,
  extract::{IdQuery, read_multipart},
};

/// `POST /registrations`
pub async fn create<S, D>(
  State(state): State<AppState<S, D>>,
  multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SubmissionStore + 'static,
  D: DocumentStore + 'static,
{
  let multipart = multipart.map_err(|e| ApiError::malformed(e.body_text()))?;
  let form = read_multipart(multipart, state.max_upload_bytes).await?;

  // Runs to completion even if the client goes away mid-upload.
  let intake = state.intake.clone();
  let registration = tokio::spawn(async move { intake.submit(form).await }).await??;
  Ok((StatusCode::CREATED, Json(registration)))
}

/// `GET /registrations[?id=<n>]`
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
      let registrations = state
        .store
        .list_registrations()
        .await
        .map_err(ApiError::store)?;
      Ok(Json(registrations).into_response())
    }
    Some(id) => {
      let registration = state
        .store
        .get_registration(id)
        .await
        .map_err(ApiError::store)?
        .ok_or_else(|| ApiError::NotFound(format!("registration {id}")))?;
      Ok(Json(registration).into_response())
    }
  }
}
