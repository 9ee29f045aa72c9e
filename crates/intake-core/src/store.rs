//! The `SubmissionStore` trait: the persistence boundary.
//!
//! The trait is implemented by storage backends (e.g. `intake-store-sqlite`).
//! The intake pipeline and the HTTP layer depend on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use crate::{
  contact::{Contact, ContactSubmission},
  registration::{Registration, RegistrationSubmission},
  volunteer::{Volunteer, VolunteerSubmission},
};

/// Abstraction over a submission store backend.
///
/// Submissions are append-only: there is no update or delete. Each insert
/// assigns a fresh, monotonically increasing id per kind and returns it.
///
/// List methods return records newest `created_at` first, with ties broken by
/// ascending id. Get methods return `None` for an unknown id.
pub trait SubmissionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Liveness check used by the health endpoint.
  fn ping(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Contacts ──────────────────────────────────────────────────────────

  fn insert_contact(
    &self,
    contact: ContactSubmission,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn list_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  fn get_contact(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  // ── Registrations ─────────────────────────────────────────────────────

  fn insert_registration(
    &self,
    registration: RegistrationSubmission,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn list_registrations(
    &self,
  ) -> impl Future<Output = Result<Vec<Registration>, Self::Error>> + Send + '_;

  fn get_registration(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Registration>, Self::Error>> + Send + '_;

  // ── Volunteers ────────────────────────────────────────────────────────

  fn insert_volunteer(
    &self,
    volunteer: VolunteerSubmission,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn list_volunteers(
    &self,
  ) -> impl Future<Output = Result<Vec<Volunteer>, Self::Error>> + Send + '_;

  fn get_volunteer(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Volunteer>, Self::Error>> + Send + '_;
}
