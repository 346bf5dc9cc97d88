use std::{path::Path, time::Duration};

use async_trait::async_trait;
use reqwest::{
    Client,
    header::{HeaderName, HeaderValue},
    multipart::{Form, Part},
};
use secrecy::{ExposeSecret, SecretString};
use url::Url;
use voiceclone_config::{Credentials, WireConfig};

use crate::{
    error::{CloningResult, DelegateError},
    http_client::http_client,
    types::{ClonedAudio, Operation},
};

use super::{VoiceDelegate, require_credentials};

/// Longest provider error body echoed back in diagnostics
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Delegate that calls the configured provider endpoints
pub struct LiveDelegate {
    client: Client,
    credentials: Credentials,
    wire: WireConfig,
    timeout: Duration,
}

impl LiveDelegate {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(credentials: Credentials, wire: WireConfig, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            credentials,
            wire,
            timeout,
        })
    }

    fn auth_header(&self, api_key: &SecretString) -> Result<(HeaderName, HeaderValue), DelegateError> {
        let name = HeaderName::from_bytes(self.wire.auth_header.as_bytes())
            .map_err(|_| DelegateError::InvalidRequest("auth header name is not a valid HTTP header".to_string()))?;

        let value = if self.wire.auth_scheme.is_empty() {
            api_key.expose_secret().to_string()
        } else {
            format!("{} {}", self.wire.auth_scheme, api_key.expose_secret())
        };

        let mut value = HeaderValue::from_str(&value).map_err(|_| {
            DelegateError::InvalidRequest("API key contains characters not allowed in an HTTP header".to_string())
        })?;
        value.set_sensitive(true);

        Ok((name, value))
    }

    /// Send one multipart request and pull `url_field` out of the JSON reply
    async fn post(
        &self,
        operation: Operation,
        endpoint: &Url,
        api_key: &SecretString,
        form: Form,
        url_field: &str,
    ) -> CloningResult {
        let (header_name, header_value) = self.auth_header(api_key)?;

        tracing::debug!(%operation, "sending request to voice cloning provider");

        let response = self
            .client
            .post(endpoint.clone())
            .header(header_name, header_value)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(operation, e))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            let message = truncate(error_text.trim(), MAX_ERROR_BODY_CHARS);

            tracing::error!(%operation, "voice cloning provider API error ({status}): {message}");

            return Err(DelegateError::ProviderApi {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(operation, e))?;

        let url = extract_url(&body, url_field).inspect_err(|e| {
            tracing::error!(%operation, "unusable voice cloning provider response: {e}");
        })?;

        tracing::debug!(%operation, "voice cloning provider call complete");

        Ok(ClonedAudio { url })
    }

    fn transport_error(&self, operation: Operation, error: reqwest::Error) -> DelegateError {
        let error = error.without_url();

        if error.is_timeout() {
            tracing::error!(%operation, "voice cloning provider timed out after {:?}", self.timeout);
            DelegateError::Timeout(self.timeout)
        } else if error.is_builder() {
            tracing::error!(%operation, "failed to build provider request: {error}");
            DelegateError::InvalidRequest(error.to_string())
        } else {
            tracing::error!(%operation, "voice cloning provider request failed: {error}");
            DelegateError::Connection(error.to_string())
        }
    }
}

#[async_trait]
impl VoiceDelegate for LiveDelegate {
    async fn clone_voice(&self, audio_path: &Path) -> CloningResult {
        let operation = Operation::CloneVoice;
        let (api_key, endpoint) = require_credentials(&self.credentials, operation)?;

        let form = Form::new().part(self.wire.clone_audio_field.clone(), file_part(audio_path).await?);

        self.post(operation, endpoint, api_key, form, &self.wire.clone_url_field)
            .await
    }

    async fn synthesize(&self, text: &str, voice_sample_path: &Path) -> CloningResult {
        let operation = Operation::TextToClonedSpeech;
        let (api_key, endpoint) = require_credentials(&self.credentials, operation)?;

        let form = Form::new()
            .text(self.wire.tts_text_field.clone(), text.to_string())
            .part(self.wire.tts_sample_field.clone(), file_part(voice_sample_path).await?);

        self.post(operation, endpoint, api_key, form, &self.wire.tts_url_field)
            .await
    }

    fn name(&self) -> &str {
        "live"
    }
}

/// Read the transient sample into a multipart file part
async fn file_part(path: &Path) -> Result<Part, DelegateError> {
    let bytes = tokio::fs::read(path).await?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("sample.wav")
        .to_string();

    Ok(Part::bytes(bytes).file_name(filename))
}

/// Pull a non-empty string field out of a JSON object body
fn extract_url(body: &str, field: &str) -> Result<String, DelegateError> {
    let json: serde_json::Value =
        serde_json::from_str(body).map_err(|e| DelegateError::MalformedResponse(e.to_string()))?;

    json.get(field)
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .ok_or_else(|| DelegateError::MissingField(field.to_string()))
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
