//! Candidate registrations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr, VariantNames};

use crate::record::Record;

/// Self-assessed political understanding.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PoliticalUnderstanding {
  Beginner,
  Intermediate,
  Advance,
  Expert,
}

/// The optional document uploads a registration can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum AttachmentSlot {
  /// Proof of party membership (form field `partyCard`).
  #[strum(serialize = "partyCard")]
  PartyMembershipDocument,
  /// Curriculum vitae (form field `resume`).
  #[strum(serialize = "resume")]
  CurriculumVitae,
}

impl AttachmentSlot {
  pub const ALL: [AttachmentSlot; 2] = [
    AttachmentSlot::PartyMembershipDocument,
    AttachmentSlot::CurriculumVitae,
  ];

  /// Multipart field name the file arrives under.
  pub fn field_name(self) -> &'static str { self.into() }
}

/// A validated registration. The document links are empty until the intake
/// pipeline has uploaded the corresponding attachment; an absent attachment
/// leaves its link empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationSubmission {
  pub fullname:                  String,
  pub dob:                       String,
  pub gender:                    String,
  pub email:                     String,
  pub phone:                     String,
  pub state_of_origin:           String,
  pub state_of_residence:        String,
  pub education:                 String,
  pub previous_office:           String,
  pub interested_office:         String,
  pub previous_contest:          String,
  pub card_carrying_member:      bool,
  pub party_membership_doc_link: String,
  pub cv_link:                   String,
  pub motivation:                String,
  pub political_understanding:   Option<PoliticalUnderstanding>,
  pub assistance_needed:         Vec<String>,
  pub other_support:             String,
  pub availability:              Vec<String>,
  pub preferred_communication:   String,
  pub consent:                   bool,
  pub created_at:                DateTime<Utc>,
}

impl RegistrationSubmission {
  /// Store the public link obtained for `slot`.
  pub fn set_document_link(&mut self, slot: AttachmentSlot, link: String) {
    match slot {
      AttachmentSlot::PartyMembershipDocument => {
        self.party_membership_doc_link = link
      }
      AttachmentSlot::CurriculumVitae => self.cv_link = link,
    }
  }
}

pub type Registration = Record<RegistrationSubmission>;
