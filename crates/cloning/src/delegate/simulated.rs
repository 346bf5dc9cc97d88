use std::path::Path;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use voiceclone_config::Credentials;

use crate::{
    error::CloningResult,
    types::{ClonedAudio, Operation},
};

use super::{VoiceDelegate, require_credentials};

/// Delegate that never calls out
///
/// Credentials are checked exactly as the live delegate checks them. The
/// returned URL is derived from a digest of the request content, so distinct
/// samples always map to distinct URLs.
pub struct SimulatedDelegate {
    credentials: Credentials,
    base_url: String,
}

impl SimulatedDelegate {
    pub fn new(credentials: Credentials, base_url: &str) -> Self {
        Self {
            credentials,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn placeholder_url(&self, kind: &str, hasher: Sha256) -> String {
        let digest = hasher.finalize();
        let token: String = digest.iter().take(8).map(|byte| format!("{byte:02x}")).collect();

        format!("{}/{kind}-{token}.wav", self.base_url)
    }
}

#[async_trait]
impl VoiceDelegate for SimulatedDelegate {
    async fn clone_voice(&self, audio_path: &Path) -> CloningResult {
        require_credentials(&self.credentials, Operation::CloneVoice)?;

        let sample = tokio::fs::read(audio_path).await?;

        tracing::debug!(sample_len = sample.len(), "simulating voice cloning");

        let mut hasher = Sha256::new();
        hasher.update(&sample);

        Ok(ClonedAudio {
            url: self.placeholder_url("cloned-voice", hasher),
        })
    }

    async fn synthesize(&self, text: &str, voice_sample_path: &Path) -> CloningResult {
        require_credentials(&self.credentials, Operation::TextToClonedSpeech)?;

        let sample = tokio::fs::read(voice_sample_path).await?;

        tracing::debug!(
            sample_len = sample.len(),
            text_len = text.len(),
            "simulating text-to-cloned-speech"
        );

        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        hasher.update([0]);
        hasher.update(&sample);

        Ok(ClonedAudio {
            url: self.placeholder_url("cloned-speech", hasher),
        })
    }

    fn name(&self) -> &str {
        "simulated"
    }
}
