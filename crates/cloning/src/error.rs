use std::time::Duration;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::types::{ClonedAudio, Operation};

pub type Result<T> = std::result::Result<T, CloneError>;

/// Outcome of a single delegate call
pub type CloningResult = std::result::Result<ClonedAudio, DelegateError>;

/// Why a delegate could not produce a result URL
///
/// Messages are returned to clients, so they never carry credentials or
/// endpoint URLs.
#[derive(Debug, Error)]
pub enum DelegateError {
    /// A required provider setting resolved to absent
    #[error("Voice cloning API setting '{0}' is not configured")]
    MissingCredential(&'static str),

    /// The transient sample could not be read back
    #[error("Failed to read voice sample: {0}")]
    Io(#[from] std::io::Error),

    /// The outbound request could not be built
    #[error("Invalid provider request: {0}")]
    InvalidRequest(String),

    /// Network or connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// The provider did not answer in time
    #[error("Provider did not respond within {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// The provider answered with a non-success status
    #[error("Provider API error ({status}): {message}")]
    ProviderApi { status: u16, message: String },

    /// The success body was not valid JSON
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// The success body lacked the result URL
    #[error("Provider response did not contain '{0}'")]
    MissingField(String),
}

/// Errors surfaced by the HTTP handlers
#[derive(Debug, Error)]
pub enum CloneError {
    /// A required form field is missing or empty
    #[error("{0}")]
    Validation(&'static str),

    /// The delegate reported a failure
    #[error("{operation} failed: {source}")]
    Delegate {
        operation: Operation,
        #[source]
        source: DelegateError,
    },

    /// Anything else, e.g. the temp file could not be written
    #[error("{operation} failed: {source}")]
    Internal {
        operation: Operation,
        #[source]
        source: std::io::Error,
    },
}

impl CloneError {
    pub const fn delegate(operation: Operation, source: DelegateError) -> Self {
        Self::Delegate { operation, source }
    }

    pub const fn internal(operation: Operation, source: std::io::Error) -> Self {
        Self::Internal { operation, source }
    }

    /// Get the appropriate HTTP status code for this error
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Delegate { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error body: `{error}` for client errors, `{error, message}` otherwise
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl IntoResponse for CloneError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            Self::Validation(message) => ErrorResponse {
                error: message.to_string(),
                message: None,
            },
            Self::Delegate { operation, source } => ErrorResponse {
                error: operation.failure_label().to_string(),
                message: Some(source.to_string()),
            },
            // Details stay in the server log
            Self::Internal { operation, .. } => ErrorResponse {
                error: operation.failure_label().to_string(),
                message: Some("Internal server error".to_string()),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Build a `{error}` rejection for request-level failures
pub(crate) fn rejection(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            message: None,
        }),
    )
        .into_response()
}
