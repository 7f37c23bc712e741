//! Request validation layer
//!
//! Validators run before any network or model call; a rejected upload
//! never reaches the resolution engine.

pub mod upload;

pub use upload::{validate_image_upload, UploadError, MAX_UPLOAD_BYTES};
