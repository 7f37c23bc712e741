//! Uploaded image validation
//!
//! Enforces the upload constraints locally, before any bytes are sent
//! to the classifier: the declared content type must be an image type
//! and the payload must not exceed 10 MiB. Error messages are
//! user-facing.

use thiserror::Error;

/// Maximum accepted upload size (10 MiB)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Upload validation errors; messages are shown to the user verbatim
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please upload an image file (JPG, PNG, TIFF)")]
    NotAnImage,

    #[error("Please upload an image smaller than 10MB")]
    TooLarge,
}

/// Validate an uploaded file before classification.
///
/// The declared content type is authoritative when present; when the
/// part carries no content type, the file's magic bytes are sniffed
/// instead.
pub fn validate_image_upload(
    content_type: Option<&str>,
    data: &[u8],
) -> Result<(), UploadError> {
    match content_type {
        Some(ct) if ct.starts_with("image/") => {}
        Some(_) => return Err(UploadError::NotAnImage),
        None => match infer::get(data) {
            Some(kind) if kind.mime_type().starts_with("image/") => {}
            _ => return Err(UploadError::NotAnImage),
        },
    }

    if data.len() > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge);
    }

    Ok(())
}
