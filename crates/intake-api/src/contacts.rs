//! Handlers for `/contact` and `/contacts`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/contacts` | JSON or urlencoded body |
//! | `GET`  | `/contacts` | Newest first |
//! | `GET`  | `/contacts?id=<n>` | 404 if not found |

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

/// `POST /contacts`
pub async fn create<S, D>(
  State(state): State<AppState<S, D>>,
  SubmittedFields(fields): SubmittedFields,
) -> Result<impl IntoResponse, ApiError>
where
  S: SubmissionStore,
  D: DocumentStore,
{
  let submission = validate::contact(&fields, Utc::now())
    .inspect_err(|e| tracing::info!(error = %e, "contact rejected"))?;

  let id = state
    .store
    .insert_contact(submission.clone())
    .await
    .map_err(IntakeError::persistence)?;

  tracing::info!(id, "contact persisted");
  Ok((StatusCode::CREATED, Json(Record::new(id, submission))))
}

/// `GET /contacts[?id=<n>]`
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
      let contacts = state.store.list_contacts().await.map_err(ApiError::store)?;
      Ok(Json(contacts).into_response())
    }
    Some(id) => {
      let contact = state
        .store
        .get_contact(id)
        .await
        .map_err(ApiError::store)?
        .ok_or_else(|| ApiError::NotFound(format!("contact {id}")))?;
      Ok(Json(contact).into_response())
    }
  }
}
