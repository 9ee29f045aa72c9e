//! [`Record`]: a submission after the repository has assigned its id.

use serde::{Deserialize, Serialize};

/// A persisted submission. The id is assigned by the repository on insert and
/// never changes; everything else is exactly what was submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
  pub id:         i64,
  #[serde(flatten)]
  pub submission: T,
}

impl<T> Record<T> {
  pub fn new(id: i64, submission: T) -> Self { Self { id, submission } }
}
