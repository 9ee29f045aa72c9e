//! Raw, unvalidated request content.
//!
//! [`RawFields`] is the key → value(s) mapping the validator consumes. It keeps
//! every pair in submission order so repeated fields (multi-selects) survive
//! intact. [`RawForm`] adds the file parts of a multipart body, each spilled to
//! a temporary file that is removed when the form is dropped.

use std::{collections::HashMap, path::Path};

use serde_json::Value;
use tempfile::NamedTempFile;

use crate::IntakeError;

// ─── Fields ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
  pairs: Vec<(String, String)>,
}

impl RawFields {
  pub fn new() -> Self { Self::default() }

  pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.pairs.push((name.into(), value.into()));
  }

  /// First value submitted under exactly `name`.
  pub fn first(&self, name: &str) -> Option<&str> {
    self
      .pairs
      .iter()
      .find(|(k, _)| k == name)
      .map(|(_, v)| v.as_str())
  }

  /// Every value submitted under `base` or `base[]`, in submission order.
  pub fn multi(&self, base: &str) -> Vec<String> {
    self
      .pairs
      .iter()
      .filter(|(k, _)| k.strip_suffix("[]").unwrap_or(k) == base)
      .map(|(_, v)| v.clone())
      .collect()
  }

  pub fn is_empty(&self) -> bool { self.pairs.is_empty() }

  /// Flatten a JSON object body into raw fields.
  ///
  /// Strings, numbers and booleans become single values, arrays become
  /// repeated values and `null` is treated as absent. Nested objects are not
  /// part of any submission shape and are rejected.
  pub fn from_json(body: Value) -> Result<Self, IntakeError> {
    let Value::Object(map) = body else {
      return Err(IntakeError::MalformedRequest(
        "expected a JSON object".to_string(),
      ));
    };

    let mut fields = Self::new();
    for (name, value) in map {
      match value {
        Value::Array(items) => {
          for item in items {
            if let Some(s) = scalar(&name, item)? {
              fields.push(name.clone(), s);
            }
          }
        }
        other => {
          if let Some(s) = scalar(&name, other)? {
            fields.push(name, s);
          }
        }
      }
    }
    Ok(fields)
  }
}

fn scalar(name: &str, value: Value) -> Result<Option<String>, IntakeError> {
  match value {
    Value::Null => Ok(None),
    Value::String(s) => Ok(Some(s)),
    Value::Bool(b) => Ok(Some(b.to_string())),
    Value::Number(n) => Ok(Some(n.to_string())),
    Value::Array(_) | Value::Object(_) => Err(IntakeError::MalformedRequest(
      format!("field {name:?} has an unsupported nested value"),
    )),
  }
}

impl<K, V> FromIterator<(K, V)> for RawFields
where
  K: Into<String>,
  V: Into<String>,
{
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self {
      pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
    }
  }
}

// ─── Attachments ─────────────────────────────────────────────────────────────

/// One uploaded file part, spilled to disk for the lifetime of the request.
#[derive(Debug)]
pub struct Attachment {
  pub filename:     String,
  /// `Content-Type` declared on the part, if any.
  pub content_type: Option<String>,
  pub size:         u64,
  spill:            NamedTempFile,
}

impl Attachment {
  pub fn new(
    filename: impl Into<String>,
    content_type: Option<String>,
    spill: NamedTempFile,
    size: u64,
  ) -> Self {
    Self {
      filename: filename.into(),
      content_type,
      size,
      spill,
    }
  }

  /// Location of the spilled content.
  pub fn path(&self) -> &Path { self.spill.path() }
}

// ─── Form ────────────────────────────────────────────────────────────────────

/// A fully-read multipart body: scalar fields plus file parts by field name.
#[derive(Debug, Default)]
pub struct RawForm {
  pub fields:  RawFields,
  attachments: HashMap<String, Attachment>,
}

impl RawForm {
  pub fn new(fields: RawFields) -> Self {
    Self {
      fields,
      attachments: HashMap::new(),
    }
  }

  /// Attach a file part. A later part with the same name replaces the earlier.
  pub fn attach(&mut self, name: impl Into<String>, attachment: Attachment) {
    self.attachments.insert(name.into(), attachment);
  }

  pub fn attachment(&self, name: &str) -> Option<&Attachment> {
    self.attachments.get(name)
  }
}
