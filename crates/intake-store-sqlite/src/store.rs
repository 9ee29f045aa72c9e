//! [`SqliteStore`]: the SQLite implementation of [`SubmissionStore`].

use std::path::Path;

use intake_core::{
  contact::{Contact, ContactSubmission},
  registration::{Registration, RegistrationSubmission},
  store::SubmissionStore,
  volunteer::{Volunteer, VolunteerSubmission},
};
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{
    CONTACT_COLUMNS, REGISTRATION_COLUMNS, RawContact, RawRegistration,
    RawVolunteer, VOLUNTEER_COLUMNS, encode_dt, encode_list,
  },
  error::Error,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A submission store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store. Used by tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// `ORDER BY` shared by every list query: newest first, ties by id.
const NEWEST_FIRST: &str = "ORDER BY created_at DESC, id ASC";

// ─── SubmissionStore impl ────────────────────────────────────────────────────

impl SubmissionStore for SqliteStore {
  type Error = Error;

  async fn ping(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Contacts ──────────────────────────────────────────────────────────────

  async fn insert_contact(&self, c: ContactSubmission) -> Result<i64> {
    let subject: &'static str = c.subject.into();
    let at_str = encode_dt(c.created_at);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (fullname, email, phone, subject, message, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![c.fullname, c.email, c.phone, subject, c.message, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(id, "contact inserted");
    Ok(id)
  }

  async fn list_contacts(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {CONTACT_COLUMNS} FROM contacts {NEWEST_FIRST}"))?;
        let rows = stmt
          .query_map([], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn get_contact(&self, id: i64) -> Result<Option<Contact>> {
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
              rusqlite::params![id],
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  // ── Registrations ─────────────────────────────────────────────────────────

  async fn insert_registration(&self, r: RegistrationSubmission) -> Result<i64> {
    let political: Option<&'static str> =
      r.political_understanding.map(Into::into);
    let assistance_str = encode_list(&r.assistance_needed)?;
    let availability_str = encode_list(&r.availability)?;
    let at_str = encode_dt(r.created_at);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO registrations (
             fullname, dob, gender, email, phone, state_of_origin,
             state_of_residence, education, previous_office, interested_office,
             previous_contest, card_carrying_member, party_membership_doc_link,
             cv_link, motivation, political_understanding, assistance_needed,
             other_support, availability, preferred_communication, consent,
             created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                     ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22)",
          rusqlite::params![
            r.fullname,
            r.dob,
            r.gender,
            r.email,
            r.phone,
            r.state_of_origin,
            r.state_of_residence,
            r.education,
            r.previous_office,
            r.interested_office,
            r.previous_contest,
            r.card_carrying_member,
            r.party_membership_doc_link,
            r.cv_link,
            r.motivation,
            political,
            assistance_str,
            r.other_support,
            availability_str,
            r.preferred_communication,
            r.consent,
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(id, "registration inserted");
    Ok(id)
  }

  async fn list_registrations(&self) -> Result<Vec<Registration>> {
    let raws: Vec<RawRegistration> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {REGISTRATION_COLUMNS} FROM registrations {NEWEST_FIRST}"
        ))?;
        let rows = stmt
          .query_map([], RawRegistration::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawRegistration::into_registration)
      .collect()
  }

  async fn get_registration(&self, id: i64) -> Result<Option<Registration>> {
    let raw: Option<RawRegistration> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE id = ?1"),
              rusqlite::params![id],
              RawRegistration::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawRegistration::into_registration).transpose()
  }

  // ── Volunteers ────────────────────────────────────────────────────────────

  async fn insert_volunteer(&self, v: VolunteerSubmission) -> Result<i64> {
    let skills_str = encode_list(&v.skills)?;
    let at_str = encode_dt(v.created_at);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO volunteers (full_name, email, phone, location, skills, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![v.full_name, v.email, v.phone, v.location, skills_str, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(id, "volunteer inserted");
    Ok(id)
  }

  async fn list_volunteers(&self) -> Result<Vec<Volunteer>> {
    let raws: Vec<RawVolunteer> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {VOLUNTEER_COLUMNS} FROM volunteers {NEWEST_FIRST}"
        ))?;
        let rows = stmt
          .query_map([], RawVolunteer::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawVolunteer::into_volunteer).collect()
  }

  async fn get_volunteer(&self, id: i64) -> Result<Option<Volunteer>> {
    let raw: Option<RawVolunteer> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {VOLUNTEER_COLUMNS} FROM volunteers WHERE id = ?1"),
              rusqlite::params![id],
              RawVolunteer::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawVolunteer::into_volunteer).transpose()
  }
}
