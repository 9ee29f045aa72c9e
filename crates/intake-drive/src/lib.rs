//! Google Drive document host for uploaded registration documents.
//!
//! [`DriveClient`] implements [`intake_core::documents::DocumentStore`].
//! Build it once at startup from a service-account key with
//! [`DriveClient::new`]; an unreadable key fails construction so the process
//! never starts half configured. Access tokens are fetched on first use and
//! refreshed before they expire.

mod auth;
mod client;

pub mod error;

#[cfg(test)]
mod tests;

pub use auth::{DRIVE_SCOPE, ServiceAccountKey, ServiceAccountTokens};
pub use client::{DEFAULT_API_BASE, DriveClient};
pub use error::{Error, Result};
