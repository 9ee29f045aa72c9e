//! Contact messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr, VariantNames};

use crate::record::Record;

/// What a contact message is about. Closed set; anything else is rejected.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
  VariantNames,
)]
pub enum ContactSubject {
  #[serde(rename = "registration support")]
  #[strum(serialize = "registration support")]
  RegistrationSupport,
  #[serde(rename = "volunteer")]
  #[strum(serialize = "volunteer")]
  Volunteer,
  #[serde(rename = "general inquiry")]
  #[strum(serialize = "general inquiry")]
  GeneralInquiry,
}

/// A validated contact message awaiting persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
  pub fullname:   String,
  pub email:      String,
  pub phone:      String,
  pub subject:    ContactSubject,
  pub message:    String,
  pub created_at: DateTime<Utc>,
}

pub type Contact = Record<ContactSubmission>;
