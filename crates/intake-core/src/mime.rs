//! Content-type selection for uploaded documents.

use std::path::Path;

pub const OCTET_STREAM: &str = "application/octet-stream";

/// The declared part type when there is one, otherwise a guess from the
/// filename's extension.
pub fn content_type_for(declared: Option<&str>, filename: &str) -> String {
  match declared {
    Some(ct) if !ct.trim().is_empty() => ct.to_owned(),
    _ => from_extension(filename).to_owned(),
  }
}

pub fn from_extension(filename: &str) -> &'static str {
  let ext = Path::new(filename)
    .extension()
    .and_then(|e| e.to_str())
    .map(str::to_ascii_lowercase);

  match ext.as_deref() {
    Some("pdf") => "application/pdf",
    Some("doc") => "application/msword",
    Some("docx") => {
      "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    }
    Some("jpg" | "jpeg") => "image/jpeg",
    Some("png") => "image/png",
    _ => OCTET_STREAM,
  }
}
