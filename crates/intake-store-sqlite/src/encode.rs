//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with a fixed nanosecond
//! fraction, so that ordering by the text column is chronological.
//! Multi-select fields are stored as compact JSON arrays.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use intake_core::{
  contact::{Contact, ContactSubject, ContactSubmission},
  record::Record,
  registration::{PoliticalUnderstanding, Registration, RegistrationSubmission},
  volunteer::{Volunteer, VolunteerSubmission},
};
use rusqlite::Row;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Multi-select lists ──────────────────────────────────────────────────────

pub fn encode_list(items: &[String]) -> Result<String> {
  Ok(serde_json::to_string(items)?)
}

pub fn decode_list(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Closed-set columns ──────────────────────────────────────────────────────

fn decode_enum<E: FromStr>(column: &'static str, value: String) -> Result<E> {
  E::from_str(&value).map_err(|_| Error::UnknownValue { column, value })
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const CONTACT_COLUMNS: &str =
  "id, fullname, email, phone, subject, message, created_at";

/// Raw values read directly from a `contacts` row.
pub struct RawContact {
  pub id:         i64,
  pub fullname:   String,
  pub email:      String,
  pub phone:      String,
  pub subject:    String,
  pub message:    String,
  pub created_at: String,
}

impl RawContact {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      fullname:   row.get(1)?,
      email:      row.get(2)?,
      phone:      row.get(3)?,
      subject:    row.get(4)?,
      message:    row.get(5)?,
      created_at: row.get(6)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Record::new(self.id, ContactSubmission {
      fullname:   self.fullname,
      email:      self.email,
      phone:      self.phone,
      subject:    decode_enum::<ContactSubject>("subject", self.subject)?,
      message:    self.message,
      created_at: decode_dt(&self.created_at)?,
    }))
  }
}

pub const REGISTRATION_COLUMNS: &str = "
  id, fullname, dob, gender, email, phone, state_of_origin, state_of_residence,
  education, previous_office, interested_office, previous_contest,
  card_carrying_member, party_membership_doc_link, cv_link, motivation,
  political_understanding, assistance_needed, other_support, availability,
  preferred_communication, consent, created_at";

/// Raw values read directly from a `registrations` row.
pub struct RawRegistration {
  pub id:                        i64,
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
  pub political_understanding:   Option<String>,
  pub assistance_needed:         String,
  pub other_support:             String,
  pub availability:              String,
  pub preferred_communication:   String,
  pub consent:                   bool,
  pub created_at:                String,
}

impl RawRegistration {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                        row.get(0)?,
      fullname:                  row.get(1)?,
      dob:                       row.get(2)?,
      gender:                    row.get(3)?,
      email:                     row.get(4)?,
      phone:                     row.get(5)?,
      state_of_origin:           row.get(6)?,
      state_of_residence:        row.get(7)?,
      education:                 row.get(8)?,
      previous_office:           row.get(9)?,
      interested_office:         row.get(10)?,
      previous_contest:          row.get(11)?,
      card_carrying_member:      row.get(12)?,
      party_membership_doc_link: row.get(13)?,
      cv_link:                   row.get(14)?,
      motivation:                row.get(15)?,
      political_understanding:   row.get(16)?,
      assistance_needed:         row.get(17)?,
      other_support:             row.get(18)?,
      availability:              row.get(19)?,
      preferred_communication:   row.get(20)?,
      consent:                   row.get(21)?,
      created_at:                row.get(22)?,
    })
  }

  pub fn into_registration(self) -> Result<Registration> {
    let political_understanding = self
      .political_understanding
      .map(|v| {
        decode_enum::<PoliticalUnderstanding>("political_understanding", v)
      })
      .transpose()?;

    Ok(Record::new(self.id, RegistrationSubmission {
      fullname: self.fullname,
      dob: self.dob,
      gender: self.gender,
      email: self.email,
      phone: self.phone,
      state_of_origin: self.state_of_origin,
      state_of_residence: self.state_of_residence,
      education: self.education,
      previous_office: self.previous_office,
      interested_office: self.interested_office,
      previous_contest: self.previous_contest,
      card_carrying_member: self.card_carrying_member,
      party_membership_doc_link: self.party_membership_doc_link,
      cv_link: self.cv_link,
      motivation: self.motivation,
      political_understanding,
      assistance_needed: decode_list(&self.assistance_needed)?,
      other_support: self.other_support,
      availability: decode_list(&self.availability)?,
      preferred_communication: self.preferred_communication,
      consent: self.consent,
      created_at: decode_dt(&self.created_at)?,
    }))
  }
}

pub const VOLUNTEER_COLUMNS: &str =
  "id, full_name, email, phone, location, skills, created_at";

/// Raw values read directly from a `volunteers` row.
pub struct RawVolunteer {
  pub id:         i64,
  pub full_name:  String,
  pub email:      String,
  pub phone:      Option<String>,
  pub location:   Option<String>,
  pub skills:     String,
  pub created_at: String,
}

impl RawVolunteer {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      full_name:  row.get(1)?,
      email:      row.get(2)?,
      phone:      row.get(3)?,
      location:   row.get(4)?,
      skills:     row.get(5)?,
      created_at: row.get(6)?,
    })
  }

  pub fn into_volunteer(self) -> Result<Volunteer> {
    Ok(Record::new(self.id, VolunteerSubmission {
      full_name:  self.full_name,
      email:      self.email,
      phone:      self.phone,
      location:   self.location,
      skills:     decode_list(&self.skills)?,
      created_at: decode_dt(&self.created_at)?,
    }))
  }
}
