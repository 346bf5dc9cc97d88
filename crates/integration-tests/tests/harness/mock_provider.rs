//! Mock voice cloning provider for integration tests
//!
//! Accepts the default wire contract and answers with URLs derived from the
//! uploaded bytes, so callers can tell which request produced which result.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

use super::hex;

/// How the mock answers every request
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Return the expected URL field
    Succeed,
    /// Answer with the given status and body
    Fail(StatusCode, &'static str),
    /// Sleep before answering successfully
    Delay(Duration),
    /// Answer 200 with JSON that lacks the URL field
    OmitField,
    /// Answer 200 with a body that is not JSON
    Malformed,
}

/// Mock provider serving `/clone` and `/tts`
pub struct MockProvider {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    behavior: Behavior,
    request_count: AtomicU32,
    last_authorization: Mutex<Option<String>>,
    last_text: Mutex<Option<String>>,
}

impl MockProvider {
    /// Start a mock that always succeeds
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(Behavior::Succeed).await
    }

    /// Start a mock with the given behavior
    pub async fn start_with(behavior: Behavior) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            behavior,
            request_count: AtomicU32::new(0),
            last_authorization: Mutex::new(None),
            last_text: Mutex::new(None),
        });

        let app = Router::new()
            .route("/clone", routing::post(handle_clone))
            .route("/tts", routing::post(handle_tts))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Endpoint for voice cloning
    pub fn clone_url(&self) -> String {
        format!("http://{}/clone", self.addr)
    }

    /// Endpoint for text-to-speech
    pub fn tts_url(&self) -> String {
        format!("http://{}/tts", self.addr)
    }

    /// Number of requests received on either endpoint
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// Authorization header of the most recent request
    pub fn last_authorization(&self) -> Option<String> {
        self.state.last_authorization.lock().unwrap().clone()
    }

    /// Text field of the most recent text-to-speech request
    pub fn last_text(&self) -> Option<String> {
        self.state.last_text.lock().unwrap().clone()
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// URL the mock returns for a cloned sample
pub fn expected_clone_url(sample: &[u8]) -> String {
    format!("https://cdn.mock/clone/{}.wav", hex(sample))
}

/// URL the mock returns for synthesized speech
pub fn expected_tts_url(text: &str, sample: &[u8]) -> String {
    format!("https://cdn.mock/tts/{}-{}.wav", hex(text.as_bytes()), hex(sample))
}

/// Collect text fields and file contents from the request
async fn read_form(mut multipart: Multipart) -> (Option<String>, Option<Vec<u8>>, Option<Vec<u8>>) {
    let mut text = None;
    let mut audio = None;
    let mut voice_sample = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_owned();
        let Ok(bytes) = field.bytes().await else {
            break;
        };

        match name.as_str() {
            "text" => text = Some(String::from_utf8_lossy(&bytes).into_owned()),
            "audio" => audio = Some(bytes.to_vec()),
            "voice_sample" => voice_sample = Some(bytes.to_vec()),
            _ => {}
        }
    }

    (text, audio, voice_sample)
}

fn record(state: &MockState, headers: &HeaderMap) {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let authorization = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    *state.last_authorization.lock().unwrap() = authorization;
}

/// Apply the configured behavior, returning early unless the mock should succeed
async fn misbehave(behavior: &Behavior) -> Option<Response> {
    match behavior {
        Behavior::Succeed => None,
        Behavior::Fail(status, body) => Some((*status, *body).into_response()),
        Behavior::Delay(delay) => {
            tokio::time::sleep(*delay).await;
            None
        }
        Behavior::OmitField => Some(Json(serde_json::json!({ "status": "done" })).into_response()),
        Behavior::Malformed => Some((StatusCode::OK, "<html>gateway hiccup</html>").into_response()),
    }
}

async fn handle_clone(State(state): State<Arc<MockState>>, headers: HeaderMap, multipart: Multipart) -> Response {
    record(&state, &headers);

    let (_, audio, _) = read_form(multipart).await;

    if let Some(response) = misbehave(&state.behavior).await {
        return response;
    }

    let Some(audio) = audio else {
        return (StatusCode::BAD_REQUEST, "missing audio").into_response();
    };

    Json(serde_json::json!({ "cloned_audio_url": expected_clone_url(&audio) })).into_response()
}

async fn handle_tts(State(state): State<Arc<MockState>>, headers: HeaderMap, multipart: Multipart) -> Response {
    record(&state, &headers);

    let (text, _, voice_sample) = read_form(multipart).await;
    state.last_text.lock().unwrap().clone_from(&text);

    if let Some(response) = misbehave(&state.behavior).await {
        return response;
    }

    let (Some(text), Some(voice_sample)) = (text, voice_sample) else {
        return (StatusCode::BAD_REQUEST, "missing text or voice_sample").into_response();
    };

    Json(serde_json::json!({ "cloned_speech_url": expected_tts_url(&text, &voice_sample) })).into_response()
}
