use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::VoiceCloningApiConfig;

/// Provider credentials resolved once at startup
///
/// Each field is independently optional. Callers that need a field treat
/// `None` as an unmet precondition instead of failing at load time.
#[derive(Clone, Default)]
pub struct Credentials {
    api_key: Option<SecretString>,
    clone_endpoint: Option<Url>,
    tts_endpoint: Option<Url>,
}

impl Credentials {
    /// Resolve credentials from the provider configuration
    ///
    /// Empty or unparseable values resolve to absent. A single warning naming
    /// every absent setting is emitted; values are never logged.
    pub fn load(config: &VoiceCloningApiConfig) -> Self {
        let credentials = Self {
            api_key: config
                .api_key
                .clone()
                .filter(|key| !key.expose_secret().trim().is_empty()),
            clone_endpoint: parse_endpoint(config.clone_voice_endpoint.as_deref()),
            tts_endpoint: parse_endpoint(config.text_to_speech_endpoint.as_deref()),
        };

        let missing = credentials.missing();
        if missing.is_empty() {
            tracing::debug!("voice cloning credentials loaded");
        } else {
            tracing::warn!(
                missing = %missing.join(", "),
                "voice cloning API settings are missing; affected operations will fail until configured"
            );
        }

        credentials
    }

    /// Build credentials directly, bypassing configuration
    pub const fn new(api_key: Option<SecretString>, clone_endpoint: Option<Url>, tts_endpoint: Option<Url>) -> Self {
        Self {
            api_key,
            clone_endpoint,
            tts_endpoint,
        }
    }

    pub const fn api_key(&self) -> Option<&SecretString> {
        self.api_key.as_ref()
    }

    pub const fn clone_endpoint(&self) -> Option<&Url> {
        self.clone_endpoint.as_ref()
    }

    pub const fn tts_endpoint(&self) -> Option<&Url> {
        self.tts_endpoint.as_ref()
    }

    /// Names of the settings that resolved to absent
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.api_key.is_none() {
            missing.push("api_key");
        }
        if self.clone_endpoint.is_none() {
            missing.push("clone_voice_endpoint");
        }
        if self.tts_endpoint.is_none() {
            missing.push("text_to_speech_endpoint");
        }

        missing
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn presence<T>(value: Option<&T>) -> &'static str {
            if value.is_some() { "present" } else { "absent" }
        }

        f.debug_struct("Credentials")
            .field("api_key", &presence(self.api_key.as_ref()))
            .field("clone_endpoint", &presence(self.clone_endpoint.as_ref()))
            .field("tts_endpoint", &presence(self.tts_endpoint.as_ref()))
            .finish()
    }
}

fn parse_endpoint(raw: Option<&str>) -> Option<Url> {
    let raw = raw.map(str::trim).filter(|value| !value.is_empty())?;
    Url::parse(raw).ok()
}
