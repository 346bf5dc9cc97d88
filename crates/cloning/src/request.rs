use std::collections::HashMap;

use axum::{
    body::Body,
    extract::{FromRequest, Multipart},
    http::StatusCode,
    response::Response,
};

use crate::{
    error::{CloneError, rejection},
    types::{Operation, Upload},
};

/// Multipart form split into file parts and plain text fields
///
/// A part counts as a file only when it carries a `filename` parameter. The
/// first occurrence of a repeated field wins.
#[derive(Debug, Default)]
pub struct UploadForm {
    files: HashMap<String, Upload>,
    texts: HashMap<String, String>,
}

impl UploadForm {
    /// Text for text-to-speech; absent and empty are both rejected
    pub fn require_text(&mut self, name: &str) -> Result<String, CloneError> {
        self.texts
            .remove(name)
            .filter(|text| !text.is_empty())
            .ok_or(CloneError::Validation("No text provided"))
    }

    /// The operation's audio upload with a non-empty filename
    pub fn require_file(&mut self, operation: Operation) -> Result<Upload, CloneError> {
        let upload = self
            .files
            .remove(operation.file_field())
            .ok_or(CloneError::Validation(operation.missing_file_message()))?;

        if upload.filename.is_empty() {
            return Err(CloneError::Validation(operation.unnamed_file_message()));
        }

        Ok(upload)
    }
}

/// Extractor for multipart form data carrying audio uploads
///
/// The body size limit comes from the router's `DefaultBodyLimit` layer.
pub struct ExtractUploads(pub UploadForm);

impl<S> FromRequest<S> for ExtractUploads
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: http::Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = request
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            return Err(rejection(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported Content-Type, expected: 'Content-Type: multipart/form-data'",
            ));
        }

        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| rejection(StatusCode::BAD_REQUEST, format!("Failed to parse multipart form: {e}")))?;

        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| rejection(e.status(), e.body_text()))? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if let Some(filename) = field.file_name().map(str::to_string) {
                let bytes = field.bytes().await.map_err(|e| rejection(e.status(), e.body_text()))?;

                tracing::debug!(field = %name, %filename, bytes = bytes.len(), "received file part");

                form.files.entry(name).or_insert(Upload {
                    filename,
                    bytes,
                });
            } else {
                let text = field.text().await.map_err(|e| rejection(e.status(), e.body_text()))?;
                form.texts.entry(name).or_insert(text);
            }
        }

        Ok(Self(form))
    }
}
