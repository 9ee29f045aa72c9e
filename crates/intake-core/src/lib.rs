//! Core types, validation and the registration intake pipeline.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! repository and the document host are reached only through the
//! [`store::SubmissionStore`] and [`documents::DocumentStore`] traits.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod contact;
pub mod documents;
pub mod error;
pub mod form;
pub mod mime;
pub mod pipeline;
pub mod record;
pub mod registration;
pub mod retry;
pub mod store;
pub mod validate;
pub mod volunteer;

pub use error::{BoxError, IntakeError, Result, ValidationError};
pub use pipeline::RegistrationIntake;
