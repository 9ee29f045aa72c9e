//! The `DocumentStore` trait: the external document host.
//!
//! The pipeline only needs two capabilities: put a file somewhere durable and
//! make it publicly readable. Authentication and transport belong to the
//! implementation (see `intake-drive`).

use std::{future::Future, path::Path};

use serde::{Deserialize, Serialize};

/// One file to upload. The content is read from `path` (the request's spill
/// file).
#[derive(Debug, Clone, Copy)]
pub struct DocumentUpload<'a> {
  pub path:        &'a Path,
  pub filename:    &'a str,
  pub mime_type:   &'a str,
  /// Destination folder identifier on the document host.
  pub destination: &'a str,
}

/// Where an uploaded document ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
  pub id:         String,
  pub public_url: String,
}

pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn upload<'a>(
    &'a self,
    upload: DocumentUpload<'a>,
  ) -> impl Future<Output = Result<StoredDocument, Self::Error>> + Send + 'a;

  /// Make `object_id` readable by anyone with the link. Access-control changes
  /// may lag the upload, so callers are expected to retry.
  fn grant_public_read<'a>(
    &'a self,
    object_id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
