pub mod live;
pub mod simulated;

use std::path::Path;

use async_trait::async_trait;
use secrecy::SecretString;
use url::Url;
use voiceclone_config::Credentials;

use crate::{
    error::{CloningResult, DelegateError},
    types::Operation,
};

/// One outbound call to the voice cloning provider per operation
///
/// Implementations hold their credentials and always return a result;
/// failures of any kind come back as [`DelegateError`].
#[async_trait]
pub trait VoiceDelegate: Send + Sync {
    /// Clone the voice in the sample at `audio_path`
    async fn clone_voice(&self, audio_path: &Path) -> CloningResult;

    /// Speak `text` in the voice of the sample at `voice_sample_path`
    async fn synthesize(&self, text: &str, voice_sample_path: &Path) -> CloningResult;

    /// Get the delegate name
    fn name(&self) -> &str;
}

/// API key and endpoint an operation needs, or the first absent setting
pub(crate) fn require_credentials(
    credentials: &Credentials,
    operation: Operation,
) -> Result<(&SecretString, &Url), DelegateError> {
    let api_key = credentials
        .api_key()
        .ok_or(DelegateError::MissingCredential("api_key"))?;

    let endpoint = match operation {
        Operation::CloneVoice => credentials
            .clone_endpoint()
            .ok_or(DelegateError::MissingCredential("clone_voice_endpoint"))?,
        Operation::TextToClonedSpeech => credentials
            .tts_endpoint()
            .ok_or(DelegateError::MissingCredential("text_to_speech_endpoint"))?,
    };

    Ok((api_key, endpoint))
}
