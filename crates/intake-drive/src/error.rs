//! Error type for `intake-drive`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid drive credentials: {0}")]
  Credentials(String),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("token signing failed: {0}")]
  Jwt(#[from] jsonwebtoken::errors::Error),

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("drive returned {status}: {body}")]
  Status { status: u16, body: String },

  #[error("drive did not return an upload session location")]
  MissingSession,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
