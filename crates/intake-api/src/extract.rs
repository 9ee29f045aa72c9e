//! Request body readers: the JSON-or-urlencoded field reader used by the
//! contact and volunteer endpoints, and the multipart reader used by
//! registrations.

use axum::{
  Form, Json,
  extract::{FromRequest, Multipart, Request},
  http::header::CONTENT_TYPE,
};
use intake_core::form::{Attachment, RawFields, RawForm};
use serde::Deserialize;
use serde_json::Value;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt as _;

use crate::error::ApiError;

// ─── Id query ────────────────────────────────────────────────────────────────

/// `?id=<n>` on the read endpoints. Absent means "list".
#[derive(Debug, Deserialize)]
pub struct IdQuery {
  pub id: Option<String>,
}

impl IdQuery {
  pub fn parse(&self) -> Result<Option<i64>, ApiError> {
    match self.id.as_deref().map(str::trim) {
      None | Some("") => Ok(None),
      Some(raw) => raw
        .parse::<i64>()
        .map(Some)
        .map_err(|_| ApiError::BadRequest(format!("invalid id {raw:?}"))),
    }
  }
}

// ─── JSON or urlencoded ──────────────────────────────────────────────────────

/// Raw fields read from a JSON object or an urlencoded form, chosen by the
/// request's `Content-Type`. Anything that is not urlencoded is read as JSON.
#[derive(Debug)]
pub struct SubmittedFields(pub RawFields);

impl<St> FromRequest<St> for SubmittedFields
where
  St: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &St) -> Result<Self, Self::Rejection> {
    let urlencoded = req
      .headers()
      .get(CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

    if urlencoded {
      let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
        .await
        .map_err(|e| ApiError::malformed(e.body_text()))?;
      Ok(Self(pairs.into_iter().collect()))
    } else {
      let Json(body) = Json::<Value>::from_request(req, state)
        .await
        .map_err(|e| ApiError::malformed(e.body_text()))?;
      Ok(Self(RawFields::from_json(body)?))
    }
  }
}

// ─── Multipart ───────────────────────────────────────────────────────────────

/// Read a whole multipart body. Text parts become fields; file parts are
/// streamed to temporary files. A file part with an empty filename is the
/// browser's "no file chosen" and counts as absent.
///
/// Fails with a malformed-request error once more than `limit` bytes of part
/// content have been read.
pub async fn read_multipart(
  mut multipart: Multipart,
  limit: u64,
) -> Result<RawForm, ApiError> {
  let mut form = RawForm::default();
  let mut total: u64 = 0;

  while let Some(mut field) = multipart
    .next_field()
    .await
    .map_err(|e| ApiError::malformed(e.body_text()))?
  {
    let Some(name) = field.name().map(str::to_owned) else {
      continue;
    };

    let Some(filename) = field.file_name().map(str::to_owned) else {
      let value = field
        .text()
        .await
        .map_err(|e| ApiError::malformed(e.body_text()))?;
      total += value.len() as u64;
      check_limit(total, limit)?;
      form.fields.push(name, value);
      continue;
    };

    if filename.is_empty() {
      continue;
    }

    let content_type = field.content_type().map(str::to_owned);
    let spill = NamedTempFile::new()?;
    let mut out = tokio::fs::File::from_std(spill.reopen()?);
    let mut size: u64 = 0;

    while let Some(chunk) = field
      .chunk()
      .await
      .map_err(|e| ApiError::malformed(e.body_text()))?
    {
      size += chunk.len() as u64;
      total += chunk.len() as u64;
      check_limit(total, limit)?;
      out.write_all(&chunk).await?;
    }
    out.flush().await?;

    tracing::debug!(field = %name, file = %filename, bytes = size, "file part spilled");
    form.attach(name, Attachment::new(filename, content_type, spill, size));
  }

  Ok(form)
}

fn check_limit(total: u64, limit: u64) -> Result<(), ApiError> {
  if total > limit {
    return Err(ApiError::malformed(format!(
      "request body exceeds {limit} bytes"
    )));
  }
  Ok(())
}
