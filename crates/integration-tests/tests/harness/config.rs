//! Programmatic configuration builder for integration tests

use std::{net::SocketAddr, path::Path};

use secrecy::SecretString;
use voiceclone_config::{
    AnyOrList, Config, CorsConfig, DelegateMode, HealthConfig, ServerConfig, UploadsConfig, VoiceCloningApiConfig,
};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Simulated delegate with full credentials, uploads under `uploads_dir`
    pub fn new(uploads_dir: &Path) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                    cors: None,
                },
                uploads: UploadsConfig {
                    temp_dir: Some(uploads_dir.to_path_buf()),
                    ..UploadsConfig::default()
                },
                voice_cloning_api: VoiceCloningApiConfig {
                    api_key: Some(SecretString::from("test-key")),
                    clone_voice_endpoint: Some("http://127.0.0.1:9/clone".to_owned()),
                    text_to_speech_endpoint: Some("http://127.0.0.1:9/tts".to_owned()),
                    ..VoiceCloningApiConfig::default()
                },
                telemetry: None,
            },
        }
    }

    /// Call a mock provider through the live delegate
    pub fn with_live_provider(mut self, clone_url: &str, tts_url: &str) -> Self {
        let api = &mut self.config.voice_cloning_api;
        api.delegate = DelegateMode::Live;
        api.clone_voice_endpoint = Some(clone_url.to_owned());
        api.text_to_speech_endpoint = Some(tts_url.to_owned());
        self
    }

    /// Remove the API key
    pub fn without_api_key(mut self) -> Self {
        self.config.voice_cloning_api.api_key = None;
        self
    }

    /// Remove both endpoints
    pub fn without_endpoints(mut self) -> Self {
        self.config.voice_cloning_api.clone_voice_endpoint = None;
        self.config.voice_cloning_api.text_to_speech_endpoint = None;
        self
    }

    /// Set the outbound timeout
    pub fn with_timeout(mut self, timeout: &str) -> Self {
        timeout.clone_into(&mut self.config.voice_cloning_api.timeout);
        self
    }

    /// Set the request body limit
    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.config.uploads.max_body_bytes = limit;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Allow browser requests from one origin
    pub fn with_cors_origin(mut self, origin: &str) -> Self {
        self.config.server.cors = Some(CorsConfig {
            origins: AnyOrList::List(vec![origin.to_owned()]),
            headers: AnyOrList::Any,
            max_age: Some(600),
        });
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config.validate().expect("test config must be valid");
        self.config
    }
}
