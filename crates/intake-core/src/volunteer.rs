//! Volunteer sign-ups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerSubmission {
  pub full_name:  String,
  pub email:      String,
  pub phone:      Option<String>,
  pub location:   Option<String>,
  /// Always present; empty when nothing was selected.
  pub skills:     Vec<String>,
  pub created_at: DateTime<Utc>,
}

pub type Volunteer = Record<VolunteerSubmission>;
