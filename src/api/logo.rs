//! Company logo upload.
//!
//! The upload is the one call that must not send `Content-Type` itself:
//! reqwest writes the multipart header with its generated boundary.

use reqwest::multipart::{Form, Part};

use super::types::LogoUpload;
use super::{ApiClient, ErrorFallback};
use crate::error::{ClientError, LOGO_UPLOAD_FAILED, UNKNOWN_SERVER_ERROR};

pub const LOGO_PATH: &str = "/api/logo";
const LOGO_FIELD: &str = "logo";
const LOGO_FILE_NAME: &str = "logo.png";
const LOGO_FALLBACK: ErrorFallback =
    ErrorFallback { missing_message: UNKNOWN_SERVER_ERROR, unparsable: Some(LOGO_UPLOAD_FAILED) };

impl ApiClient {
    /// Upload `bytes` as the company logo (`POST /api/logo`, multipart).
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the mime type is invalid or the request
    /// fails or is rejected.
    pub async fn upload_logo(&self, bytes: Vec<u8>, mime: &str) -> Result<LogoUpload, ClientError> {
        let part = Part::bytes(bytes)
            .file_name(LOGO_FILE_NAME)
            .mime_str(mime)
            .map_err(|e| ClientError::Encode(e.to_string()))?;
        let form = Form::new().part(LOGO_FIELD, part);
        self.request_multipart(LOGO_PATH, form, LOGO_FALLBACK).await
    }

    /// Public URL of the current logo. No network call.
    #[must_use]
    pub fn logo_url(&self) -> String {
        format!("{}{LOGO_PATH}", self.base_url())
    }
}

#[cfg(test)]
#[path = "logo_test.rs"]
mod tests;
