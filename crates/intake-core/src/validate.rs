//! The submission validator: raw fields in, normalized submission out.
//!
//! Strings pass through untouched; the only checks are required-field
//! presence and closed-set membership for enum fields. Boolean fields are
//! derived from a per-field sentinel by [`flag`], which is the single place
//! that policy lives.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use strum::VariantNames;

use crate::{
  ValidationError,
  contact::{ContactSubject, ContactSubmission},
  form::RawFields,
  registration::{PoliticalUnderstanding, RegistrationSubmission},
  volunteer::VolunteerSubmission,
};

/// `POST /contacts` fields.
pub fn contact(
  fields: &RawFields,
  received_at: DateTime<Utc>,
) -> Result<ContactSubmission, ValidationError> {
  Ok(ContactSubmission {
    fullname:   required(fields, "fullname")?,
    email:      required(fields, "email")?,
    phone:      optional(fields, "phone"),
    subject:    choice::<ContactSubject>(fields, "subject")?
      .ok_or(ValidationError::MissingField { field: "subject" })?,
    message:    optional(fields, "message"),
    created_at: received_at,
  })
}

/// `POST /volunteers` fields.
pub fn volunteer(
  fields: &RawFields,
  received_at: DateTime<Utc>,
) -> Result<VolunteerSubmission, ValidationError> {
  Ok(VolunteerSubmission {
    full_name:  required(fields, "full_name")?,
    email:      required(fields, "email")?,
    phone:      fields.first("phone").map(str::to_owned),
    location:   fields.first("location").map(str::to_owned),
    skills:     fields.multi("skills"),
    created_at: received_at,
  })
}

/// The scalar and multi-select fields of a registration form. Document links
/// are left empty for the intake pipeline to fill.
pub fn registration(
  fields: &RawFields,
  received_at: DateTime<Utc>,
) -> Result<RegistrationSubmission, ValidationError> {
  Ok(RegistrationSubmission {
    fullname:                  required(fields, "fullname")?,
    dob:                       optional(fields, "dateOfBirth"),
    gender:                    optional(fields, "gender"),
    email:                     required(fields, "email")?,
    phone:                     optional(fields, "phone"),
    state_of_origin:           optional(fields, "stateOfOrigin"),
    state_of_residence:        optional(fields, "stateOfResidence"),
    education:                 optional(fields, "education"),
    previous_office:           optional(fields, "previousOffice"),
    interested_office:         optional(fields, "interestedOffice"),
    previous_contest:          optional(fields, "previousContest"),
    card_carrying_member:      flag(fields.first("partyMember"), "yes"),
    party_membership_doc_link: String::new(),
    cv_link:                   String::new(),
    motivation:                optional(fields, "motivation"),
    political_understanding:   choice(fields, "politicalUnderstanding")?,
    assistance_needed:         fields.multi("assistanceNeeded"),
    other_support:             optional(fields, "otherSupport"),
    availability:              fields.multi("availability"),
    preferred_communication:   optional(fields, "communication"),
    consent:                   flag(fields.first("consent"), "true"),
    created_at:                received_at,
  })
}

// ─── Normalization helpers ───────────────────────────────────────────────────

fn required(
  fields: &RawFields,
  field: &'static str,
) -> Result<String, ValidationError> {
  match fields.first(field) {
    Some(v) if !v.is_empty() => Ok(v.to_owned()),
    _ => Err(ValidationError::MissingField { field }),
  }
}

fn optional(fields: &RawFields, field: &str) -> String {
  fields.first(field).unwrap_or_default().to_owned()
}

/// Boolean coercion: `true` only for the exact sentinel, `false` otherwise
/// (including absent or unrecognised input).
pub fn flag(value: Option<&str>, sentinel: &str) -> bool {
  value == Some(sentinel)
}

/// Closed-set field. Absent or empty yields `None`.
fn choice<E>(
  fields: &RawFields,
  field: &'static str,
) -> Result<Option<E>, ValidationError>
where
  E: FromStr + VariantNames,
{
  match fields.first(field) {
    None | Some("") => Ok(None),
    Some(raw) => E::from_str(raw).map(Some).map_err(|_| {
      ValidationError::InvalidEnumValue {
        field,
        value: raw.to_owned(),
        allowed: E::VARIANTS,
      }
    }),
  }
}
