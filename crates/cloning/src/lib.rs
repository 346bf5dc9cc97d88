#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

pub mod delegate;
mod error;
mod http_client;
mod request;
mod server;
pub mod transient;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::DefaultBodyLimit, extract::State, routing::post};

pub use delegate::{VoiceDelegate, live::LiveDelegate, simulated::SimulatedDelegate};
pub use error::{CloneError, CloningResult, DelegateError, Result};
pub use request::{ExtractUploads, UploadForm};
pub use server::{CloningServerBuilder, Server};
pub use transient::{TransientFile, TransientStore};
pub use types::{ClonedAudio, ClonedAudioResponse, Operation, Upload};

/// Build the cloning server from configuration
///
/// # Errors
///
/// Returns an error if the server fails to initialize
pub fn build_server(config: &voiceclone_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        CloningServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize cloning server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for voice cloning
pub fn endpoint_router(max_body_bytes: usize) -> Router<Arc<Server>> {
    Router::new()
        .route("/clone-voice", post(clone_voice))
        .route("/text-to-cloned-speech", post(text_to_cloned_speech))
        .layer(DefaultBodyLimit::max(max_body_bytes))
}

/// Handle voice cloning requests
async fn clone_voice(
    State(server): State<Arc<Server>>,
    ExtractUploads(mut form): ExtractUploads,
) -> Result<Json<ClonedAudioResponse>> {
    let operation = Operation::CloneVoice;

    let upload = form.require_file(operation).inspect_err(log_rejection)?;

    tracing::debug!(filename = %upload.filename, bytes = upload.bytes.len(), "clone-voice handler called");

    let cloned = server.clone_voice(&upload).await?;

    tracing::debug!("Voice cloning complete");

    Ok(Json(ClonedAudioResponse::new(operation, cloned)))
}

/// Handle text-to-cloned-speech requests
async fn text_to_cloned_speech(
    State(server): State<Arc<Server>>,
    ExtractUploads(mut form): ExtractUploads,
) -> Result<Json<ClonedAudioResponse>> {
    let operation = Operation::TextToClonedSpeech;

    let text = form.require_text("text").inspect_err(log_rejection)?;
    let upload = form.require_file(operation).inspect_err(log_rejection)?;

    tracing::debug!(
        filename = %upload.filename,
        bytes = upload.bytes.len(),
        text_len = text.len(),
        "text-to-cloned-speech handler called"
    );

    let cloned = server.text_to_cloned_speech(&text, &upload).await?;

    tracing::debug!("Text-to-cloned-speech generation complete");

    Ok(Json(ClonedAudioResponse::new(operation, cloned)))
}

fn log_rejection(error: &CloneError) {
    tracing::debug!("rejecting request: {error}");
}
