//! JSON/multipart HTTP API for the intake service.
//!
//! Exposes an axum [`Router`] backed by any [`SubmissionStore`] and
//! [`DocumentStore`]. CORS, tracing and the listener are the caller's
//! responsibility.
//!
//! # Routes
//!
//! Every resource answers on both its singular and plural path. `GET` without
//! `?id=` lists, `GET` with `?id=<n>` returns one record.
//!
//! | Method | Path |
//! |--------|------|
//! | `GET`  | `/health`, `/health/` |
//! | `GET`, `POST` | `/api/contact`, `/api/contacts` |
//! | `GET`, `POST` | `/api/registration`, `/api/registrations` |
//! | `GET`, `POST` | `/api/volunteer`, `/api/volunteers` |

pub mod contacts;
pub mod error;
pub mod extract;
pub mod health;
pub mod registrations;
pub mod volunteers;


use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use intake_core::{
  RegistrationIntake, documents::DocumentStore, store::SubmissionStore,
};

pub use error::ApiError;

/// Upper bound on the part content of one multipart submission (50 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 << 20;

/// Room for multipart boundaries and part headers on top of the content limit.
const MULTIPART_OVERHEAD: u64 = 64 << 10;

/// Shared handler state.
pub struct AppState<S, D> {
  pub store:            Arc<S>,
  pub intake:           Arc<RegistrationIntake<S, D>>,
  pub max_upload_bytes: u64,
}

impl<S, D> AppState<S, D> {
  pub fn new(store: Arc<S>, intake: RegistrationIntake<S, D>) -> Self {
    Self {
      store,
      intake: Arc::new(intake),
      max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
    }
  }

  pub fn with_max_upload_bytes(mut self, limit: u64) -> Self {
    self.max_upload_bytes = limit;
    self
  }
}

impl<S, D> Clone for AppState<S, D> {
  fn clone(&self) -> Self {
    Self {
      store:            self.store.clone(),
      intake:           self.intake.clone(),
      max_upload_bytes: self.max_upload_bytes,
    }
  }
}

/// Build the full router: `/health` plus the resource routes under `/api`.
pub fn router<S, D>(state: AppState<S, D>) -> Router<()>
where
  S: SubmissionStore + 'static,
  D: DocumentStore + 'static,
{
  let body_limit = state.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD);

  // Only registrations carry files; the other routes keep axum's default.
  let registration_routes = Router::new()
    .route(
      "/registration",
      get(registrations::read::<S, D>).post(registrations::create::<S, D>),
    )
    .route(
      "/registrations",
      get(registrations::read::<S, D>).post(registrations::create::<S, D>),
    )
    .layer(DefaultBodyLimit::max(
      usize::try_from(body_limit).unwrap_or(usize::MAX),
    ));

  let api = Router::new()
    // Contacts
    .route(
      "/contact",
      get(contacts::read::<S, D>).post(contacts::create::<S, D>),
    )
    .route(
      "/contacts",
      get(contacts::read::<S, D>).post(contacts::create::<S, D>),
    )
    // Volunteers
    .route(
      "/volunteer",
      get(volunteers::read::<S, D>).post(volunteers::create::<S, D>),
    )
    .route(
      "/volunteers",
      get(volunteers::read::<S, D>).post(volunteers::create::<S, D>),
    )
    .merge(registration_routes);

  Router::new()
    .route("/health", get(health::handler::<S, D>))
    .route("/health/", get(health::handler::<S, D>))
    .nest("/api", api)
    .with_state(state)
}
