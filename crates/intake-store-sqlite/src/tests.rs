//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{DateTime, Duration, TimeZone, Utc};
use intake_core::{
  contact::{ContactSubject, ContactSubmission},
  registration::{PoliticalUnderstanding, RegistrationSubmission},
  store::SubmissionStore,
  volunteer::VolunteerSubmission,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn t(minutes: i64) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes)
}

fn contact(name: &str, at: DateTime<Utc>) -> ContactSubmission {
  ContactSubmission {
    fullname:   name.into(),
    email:      format!("{name}@example.com"),
    phone:      "0800".into(),
    subject:    ContactSubject::GeneralInquiry,
    message:    "hello".into(),
    created_at: at,
  }
}

fn registration(name: &str, at: DateTime<Utc>) -> RegistrationSubmission {
  RegistrationSubmission {
    fullname:                  name.into(),
    dob:                       "1990-01-02".into(),
    gender:                    "female".into(),
    email:                     format!("{name}@example.com"),
    phone:                     "0800".into(),
    state_of_origin:           "Enugu".into(),
    state_of_residence:        "Lagos".into(),
    education:                 "BSc".into(),
    previous_office:           String::new(),
    interested_office:         "councillor".into(),
    previous_contest:          "no".into(),
    card_carrying_member:      true,
    party_membership_doc_link: "https://docs.example/1/view".into(),
    cv_link:                   String::new(),
    motivation:                "service".into(),
    political_understanding:   Some(PoliticalUnderstanding::Intermediate),
    assistance_needed:         vec!["x".into(), "y".into()],
    other_support:             String::new(),
    availability:              vec![],
    preferred_communication:   "email".into(),
    consent:                   true,
    created_at:                at,
  }
}

fn volunteer(name: &str, at: DateTime<Utc>) -> VolunteerSubmission {
  VolunteerSubmission {
    full_name:  name.into(),
    email:      format!("{name}@example.com"),
    phone:      None,
    location:   Some("Abuja".into()),
    skills:     vec!["design".into(), "outreach".into()],
    created_at: at,
  }
}

// ─── Contacts ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get_contact() {
  let s = store().await;
  let submitted = contact("ada", t(0));

  let id = s.insert_contact(submitted.clone()).await.unwrap();
  let fetched = s.get_contact(id).await.unwrap().expect("contact exists");

  assert_eq!(fetched.id, id);
  assert_eq!(fetched.submission, submitted);
}

#[tokio::test]
async fn get_contact_missing_returns_none() {
  let s = store().await;
  assert!(s.get_contact(42).await.unwrap().is_none());
}

#[tokio::test]
async fn ids_are_assigned_in_insert_order() {
  let s = store().await;
  let a = s.insert_contact(contact("a", t(0))).await.unwrap();
  let b = s.insert_contact(contact("b", t(0))).await.unwrap();
  let c = s.insert_contact(contact("c", t(0))).await.unwrap();
  assert!(a < b && b < c);
}

#[tokio::test]
async fn contacts_list_newest_first() {
  let s = store().await;
  s.insert_contact(contact("t1", t(1))).await.unwrap();
  s.insert_contact(contact("t3", t(3))).await.unwrap();
  s.insert_contact(contact("t2", t(2))).await.unwrap();

  let names: Vec<String> = s
    .list_contacts()
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.submission.fullname)
    .collect();
  assert_eq!(names, vec!["t3", "t2", "t1"]);
}

#[tokio::test]
async fn equal_timestamps_order_by_ascending_id() {
  let s = store().await;
  let first = s.insert_contact(contact("first", t(5))).await.unwrap();
  let second = s.insert_contact(contact("second", t(5))).await.unwrap();
  let newer = s.insert_contact(contact("newer", t(6))).await.unwrap();

  let ids: Vec<i64> = s
    .list_contacts()
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.id)
    .collect();
  assert_eq!(ids, vec![newer, first, second]);
}

#[tokio::test]
async fn sub_second_timestamps_order_correctly() {
  let s = store().await;
  s.insert_contact(contact("early", t(0) + Duration::milliseconds(900)))
    .await
    .unwrap();
  s.insert_contact(contact("late", t(0) + Duration::seconds(1)))
    .await
    .unwrap();

  let list = s.list_contacts().await.unwrap();
  assert_eq!(list[0].submission.fullname, "late");
}

#[tokio::test]
async fn empty_lists() {
  let s = store().await;
  assert!(s.list_contacts().await.unwrap().is_empty());
  assert!(s.list_registrations().await.unwrap().is_empty());
  assert!(s.list_volunteers().await.unwrap().is_empty());
}

// ─── Registrations ───────────────────────────────────────────────────────────

#[tokio::test]
async fn registration_round_trips_every_field() {
  let s = store().await;
  let submitted = registration("ada", t(0));

  let id = s.insert_registration(submitted.clone()).await.unwrap();
  let fetched = s.get_registration(id).await.unwrap().expect("exists");

  assert_eq!(fetched.submission, submitted);
  assert_eq!(fetched.submission.assistance_needed, vec!["x", "y"]);
  assert!(fetched.submission.availability.is_empty());
}

#[tokio::test]
async fn registration_without_political_understanding() {
  let s = store().await;
  let mut submitted = registration("ada", t(0));
  submitted.political_understanding = None;

  let id = s.insert_registration(submitted).await.unwrap();
  let fetched = s.get_registration(id).await.unwrap().unwrap();
  assert_eq!(fetched.submission.political_understanding, None);
}

#[tokio::test]
async fn registrations_list_newest_first() {
  let s = store().await;
  s.insert_registration(registration("t1", t(1))).await.unwrap();
  s.insert_registration(registration("t2", t(2))).await.unwrap();
  s.insert_registration(registration("t3", t(3))).await.unwrap();

  let list = s.list_registrations().await.unwrap();
  let names: Vec<&str> = list.iter().map(|r| r.submission.fullname.as_str()).collect();
  assert_eq!(names, vec!["t3", "t2", "t1"]);
}

#[tokio::test]
async fn get_registration_missing_returns_none() {
  let s = store().await;
  assert!(s.get_registration(7).await.unwrap().is_none());
}

// ─── Volunteers ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn volunteer_round_trip_keeps_optional_fields() {
  let s = store().await;
  let submitted = volunteer("grace", t(0));

  let id = s.insert_volunteer(submitted.clone()).await.unwrap();
  let fetched = s.get_volunteer(id).await.unwrap().unwrap();

  assert_eq!(fetched.submission, submitted);
  assert_eq!(fetched.submission.phone, None);
  assert_eq!(fetched.submission.location.as_deref(), Some("Abuja"));
}

#[tokio::test]
async fn volunteer_with_no_skills_reads_back_empty() {
  let s = store().await;
  let mut submitted = volunteer("grace", t(0));
  submitted.skills.clear();

  let id = s.insert_volunteer(submitted).await.unwrap();
  let fetched = s.get_volunteer(id).await.unwrap().unwrap();
  assert!(fetched.submission.skills.is_empty());
}

#[tokio::test]
async fn kinds_have_independent_ids() {
  let s = store().await;
  let c = s.insert_contact(contact("a", t(0))).await.unwrap();
  let v = s.insert_volunteer(volunteer("a", t(0))).await.unwrap();
  assert_eq!(c, 1);
  assert_eq!(v, 1);
  assert!(s.get_registration(1).await.unwrap().is_none());
}

// ─── Health ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ping_succeeds_on_open_store() {
  let s = store().await;
  s.ping().await.unwrap();
}

#[tokio::test]
async fn reopening_a_file_store_keeps_rows() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("reopen.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.insert_volunteer(volunteer("grace", t(0))).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.list_volunteers().await.unwrap().len(), 1);
}
