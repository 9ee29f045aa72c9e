//! The registration intake pipeline.
//!
//! Side effects happen strictly in this order:
//!
//! 1. validation (no side effects; a rejection stops here)
//! 2. one upload per attachment present on the form
//! 3. a best-effort public-read grant per upload, retried per [`RetryPolicy`]
//! 4. a single repository insert
//!
//! A failed upload aborts the submission before anything is persisted.
//! Documents uploaded earlier in the same submission are not removed.

use std::sync::Arc;

use chrono::Utc;
use tracing::Instrument as _;
use uuid::Uuid;

use crate::{
  IntakeError, Result,
  documents::{DocumentStore, DocumentUpload},
  form::{Attachment, RawForm},
  mime::content_type_for,
  record::Record,
  registration::{AttachmentSlot, Registration},
  retry::RetryPolicy,
  store::SubmissionStore,
  validate,
};

pub struct RegistrationIntake<S, D> {
  store:       Arc<S>,
  documents:   Arc<D>,
  destination: String,
  retry:       RetryPolicy,
}

impl<S, D> RegistrationIntake<S, D>
where
  S: SubmissionStore,
  D: DocumentStore,
{
  /// `destination` is the document-host folder every upload goes to.
  pub fn new(
    store: Arc<S>,
    documents: Arc<D>,
    destination: impl Into<String>,
  ) -> Self {
    Self {
      store,
      documents,
      destination: destination.into(),
      retry: RetryPolicy::default(),
    }
  }

  pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
    self.retry = retry;
    self
  }

  /// Validate, upload, persist. Returns the stored registration with its id.
  ///
  /// The form (and with it every spill file) is dropped before this returns,
  /// whatever the outcome.
  pub async fn submit(&self, form: RawForm) -> Result<Registration> {
    let received_at = Utc::now();
    let span = tracing::info_span!("registration_intake", intake_id = %Uuid::new_v4());

    async move {
      let mut submission = validate::registration(&form.fields, received_at)
        .inspect_err(|e| tracing::info!(error = %e, "registration rejected"))?;

      for slot in AttachmentSlot::ALL {
        let Some(attachment) = form.attachment(slot.field_name()) else {
          continue;
        };
        let link = self.store_attachment(slot, attachment).await?;
        submission.set_document_link(slot, link);
      }

      let id = self
        .store
        .insert_registration(submission.clone())
        .await
        .map_err(|e| {
          tracing::error!(error = %e, "registration insert failed");
          IntakeError::persistence(e)
        })?;

      tracing::info!(id, "registration persisted");
      Ok(Record::new(id, submission))
    }
    .instrument(span)
    .await
  }

  /// Upload one attachment and try to make it public. Returns its public URL.
  async fn store_attachment(
    &self,
    slot: AttachmentSlot,
    attachment: &Attachment,
  ) -> Result<String> {
    let mime_type =
      content_type_for(attachment.content_type.as_deref(), &attachment.filename);

    let stored = self
      .documents
      .upload(DocumentUpload {
        path:        attachment.path(),
        filename:    &attachment.filename,
        mime_type:   &mime_type,
        destination: &self.destination,
      })
      .await
      .map_err(|e| {
        tracing::error!(%slot, error = %e, "document upload failed");
        IntakeError::UploadFailed {
          slot,
          cause: Box::new(e),
        }
      })?;

    tracing::info!(
      %slot,
      file = %attachment.filename,
      bytes = attachment.size,
      url = %stored.public_url,
      "document uploaded"
    );

    let documents = &*self.documents;
    let object_id = stored.id.as_str();
    match self
      .retry
      .run("grant public read", move |_| documents.grant_public_read(object_id))
      .await
    {
      Ok(()) => tracing::debug!(%slot, object_id, "public read granted"),
      Err(e) => tracing::warn!(
        %slot,
        object_id,
        error = %e,
        "could not grant public read; keeping the private link"
      ),
    }

    Ok(stored.public_url)
  }
}
