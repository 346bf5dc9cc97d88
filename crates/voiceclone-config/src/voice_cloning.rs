use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;

/// Connection settings for the external voice cloning provider
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoiceCloningApiConfig {
    /// Which delegate implementation serves requests
    #[serde(default)]
    pub delegate: DelegateMode,
    /// Provider API key
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Clone-voice operation URL
    #[serde(default)]
    pub clone_voice_endpoint: Option<String>,
    /// Text-to-speech operation URL
    #[serde(default)]
    pub text_to_speech_endpoint: Option<String>,
    /// Upper bound for one outbound provider call (e.g. "60s", "2m")
    #[serde(default = "default_timeout")]
    pub timeout: String,
    /// Base for placeholder URLs returned by the simulated delegate
    #[serde(default = "default_simulated_base_url")]
    pub simulated_base_url: String,
    /// Provider wire contract
    #[serde(default)]
    pub wire: WireConfig,
}

impl Default for VoiceCloningApiConfig {
    fn default() -> Self {
        Self {
            delegate: DelegateMode::default(),
            api_key: None,
            clone_voice_endpoint: None,
            text_to_speech_endpoint: None,
            timeout: default_timeout(),
            simulated_base_url: default_simulated_base_url(),
            wire: WireConfig::default(),
        }
    }
}

impl VoiceCloningApiConfig {
    /// Parse the configured outbound timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the duration string cannot be parsed or is zero
    pub fn timeout(&self) -> anyhow::Result<Duration> {
        let timeout = duration_str::parse(&self.timeout)
            .map_err(|e| anyhow::anyhow!("invalid voice_cloning_api.timeout '{}': {e}", self.timeout))?;

        if timeout.is_zero() {
            anyhow::bail!("voice_cloning_api.timeout must be greater than zero");
        }

        Ok(timeout)
    }
}

/// Delegate implementation selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelegateMode {
    /// Return deterministic placeholder URLs without calling out
    #[default]
    Simulated,
    /// Call the configured provider endpoints
    Live,
}

/// Field names and authentication header the provider expects
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct WireConfig {
    /// Header carrying the API key
    pub auth_header: String,
    /// Scheme prefixed to the API key; empty sends the bare key
    pub auth_scheme: String,
    /// Multipart field holding the audio for clone-voice
    pub clone_audio_field: String,
    /// Multipart field holding the voice sample for text-to-speech
    pub tts_sample_field: String,
    /// Multipart field holding the text for text-to-speech
    pub tts_text_field: String,
    /// JSON field with the result URL in clone-voice responses
    pub clone_url_field: String,
    /// JSON field with the result URL in text-to-speech responses
    pub tts_url_field: String,
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            auth_header: "Authorization".to_string(),
            auth_scheme: "Bearer".to_string(),
            clone_audio_field: "audio".to_string(),
            tts_sample_field: "voice_sample".to_string(),
            tts_text_field: "text".to_string(),
            clone_url_field: "cloned_audio_url".to_string(),
            tts_url_field: "cloned_speech_url".to_string(),
        }
    }
}

fn default_timeout() -> String {
    "60s".to_string()
}

fn default_simulated_base_url() -> String {
    "https://simulated.voice-cloning.invalid".to_string()
}
