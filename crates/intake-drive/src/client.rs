//! [`DriveClient`], the Google Drive implementation of [`DocumentStore`].

use std::{sync::Arc, time::Duration};

use intake_core::documents::{DocumentStore, DocumentUpload, StoredDocument};
use reqwest::{Client, RequestBuilder, Response, header};
use serde::Deserialize;
use serde_json::json;

use crate::{
  Error, Result,
  auth::{DRIVE_SCOPE, ServiceAccountKey, ServiceAccountTokens},
};

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com";

/// File metadata returned by the Drive API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
  id:            String,
  name:          Option<String>,
  web_view_link: Option<String>,
}

/// Async client for the subset of the Drive v3 API the intake needs:
/// resumable upload into a (shared-drive) folder and link sharing.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct DriveClient {
  client:   Client,
  api_base: String,
  tokens:   Arc<ServiceAccountTokens>,
}

impl DriveClient {
  /// Fails if the key cannot sign token requests.
  pub fn new(api_base: impl Into<String>, key: ServiceAccountKey) -> Result<Self> {
    let client = Client::builder()
      .connect_timeout(Duration::from_secs(10))
      .build()?;
    let tokens = ServiceAccountTokens::new(client.clone(), key, DRIVE_SCOPE)?;
    Ok(Self {
      client,
      api_base: api_base.into().trim_end_matches('/').to_string(),
      tokens: Arc::new(tokens),
    })
  }

  fn url(&self, path: &str) -> String { format!("{}{}", self.api_base, path) }

  async fn auth(&self, req: RequestBuilder) -> Result<RequestBuilder> {
    Ok(req.bearer_auth(self.tokens.access_token().await?))
  }

  /// Start a resumable upload session and return its location.
  async fn open_session(&self, upload: &DocumentUpload<'_>, size: u64) -> Result<String> {
    let resp = self
      .auth(self.client.post(self.url("/upload/drive/v3/files")))
      .await?
      .query(&[
        ("uploadType", "resumable"),
        ("supportsAllDrives", "true"),
        ("fields", "id,name,webViewLink"),
      ])
      .header("X-Upload-Content-Type", upload.mime_type)
      .header("X-Upload-Content-Length", size)
      .json(&json!({
        "name":     upload.filename,
        "parents":  [upload.destination],
        "mimeType": upload.mime_type,
      }))
      .send()
      .await?;
    let resp = check(resp).await?;

    resp
      .headers()
      .get(header::LOCATION)
      .and_then(|v| v.to_str().ok())
      .map(str::to_owned)
      .ok_or(Error::MissingSession)
  }
}

/// Turn a non-success response into [`Error::Status`].
pub(crate) async fn check(resp: Response) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let body = resp.text().await.unwrap_or_default();
  Err(Error::Status {
    status: status.as_u16(),
    body,
  })
}

impl DocumentStore for DriveClient {
  type Error = Error;

  async fn upload<'a>(
    &'a self,
    upload: DocumentUpload<'a>,
  ) -> Result<StoredDocument> {
    let file = tokio::fs::File::open(upload.path).await?;
    let size = file.metadata().await?.len();

    let session = self.open_session(&upload, size).await?;
    let resp = self
      .auth(self.client.put(&session))
      .await?
      .header(header::CONTENT_TYPE, upload.mime_type)
      .header(header::CONTENT_LENGTH, size)
      .body(file)
      .send()
      .await?;
    let created: DriveFile = check(resp).await?.json().await?;

    tracing::debug!(
      id = %created.id,
      name = created.name.as_deref().unwrap_or(upload.filename),
      "drive file created"
    );

    let public_url = created
      .web_view_link
      .unwrap_or_else(|| format!("https://drive.google.com/file/d/{}/view", created.id));
    Ok(StoredDocument {
      id: created.id,
      public_url,
    })
  }

  async fn grant_public_read<'a>(&'a self, object_id: &'a str) -> Result<()> {
    let resp = self
      .auth(
        self
          .client
          .post(self.url(&format!("/drive/v3/files/{object_id}/permissions"))),
      )
      .await?
      .query(&[("supportsAllDrives", "true")])
      .json(&json!({ "type": "anyone", "role": "reader" }))
      .send()
      .await?;
    check(resp).await?;
    Ok(())
  }
}

