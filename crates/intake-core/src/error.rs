//! Error types for `intake-core`.

use thiserror::Error;

use crate::registration::AttachmentSlot;

/// Boxed error from an external collaborator (store, document host).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why a raw submission was rejected by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("missing required field: {field}")]
  MissingField { field: &'static str },

  #[error("invalid value {value:?} for {field}; expected one of {allowed:?}")]
  InvalidEnumValue {
    field:   &'static str,
    value:   String,
    allowed: &'static [&'static str],
  },
}

impl ValidationError {
  /// The offending field's wire name.
  pub fn field(&self) -> &'static str {
    match self {
      ValidationError::MissingField { field }
      | ValidationError::InvalidEnumValue { field, .. } => field,
    }
  }
}

/// Failure of an intake operation, in the order the pipeline can hit them.
#[derive(Debug, Error)]
pub enum IntakeError {
  #[error("malformed request: {0}")]
  MalformedRequest(String),

  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("upload of {slot} failed: {cause}")]
  UploadFailed {
    slot:  AttachmentSlot,
    #[source]
    cause: BoxError,
  },

  #[error("persistence failed: {0}")]
  PersistenceFailed(#[source] BoxError),
}

impl IntakeError {
  pub fn persistence(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    IntakeError::PersistenceFailed(Box::new(e))
  }
}

pub type Result<T, E = IntakeError> = std::result::Result<T, E>;
