use std::path::Path;

use url::Url;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Load configuration, treating a missing file as empty configuration
    ///
    /// Provider settings then resolve to absent and the affected operations
    /// fail per request instead of preventing startup.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read, parsed, or validated
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        let config = Self::default();
        config.validate()?;

        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// Missing provider settings are not an error here; only values that are
    /// present but unusable are rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint is not a valid http(s) URL, the timeout
    /// is invalid, or the upload limits are unusable
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_provider_config()?;
        self.validate_uploads_config()?;
        Ok(())
    }

    fn validate_provider_config(&self) -> anyhow::Result<()> {
        let api = &self.voice_cloning_api;

        for (name, endpoint) in [
            ("clone_voice_endpoint", &api.clone_voice_endpoint),
            ("text_to_speech_endpoint", &api.text_to_speech_endpoint),
        ] {
            let Some(endpoint) = endpoint.as_deref().map(str::trim).filter(|e| !e.is_empty()) else {
                continue;
            };

            let url = Url::parse(endpoint)
                .map_err(|e| anyhow::anyhow!("voice_cloning_api.{name} is not a valid URL: {e}"))?;

            if !matches!(url.scheme(), "http" | "https") {
                anyhow::bail!("voice_cloning_api.{name} must use http or https");
            }
        }

        api.timeout()?;

        Url::parse(&api.simulated_base_url)
            .map_err(|e| anyhow::anyhow!("voice_cloning_api.simulated_base_url is not a valid URL: {e}"))?;

        let wire = &api.wire;
        for (name, value) in [
            ("auth_header", &wire.auth_header),
            ("clone_audio_field", &wire.clone_audio_field),
            ("tts_sample_field", &wire.tts_sample_field),
            ("tts_text_field", &wire.tts_text_field),
            ("clone_url_field", &wire.clone_url_field),
            ("tts_url_field", &wire.tts_url_field),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("voice_cloning_api.wire.{name} must not be empty");
            }
        }

        Ok(())
    }

    fn validate_uploads_config(&self) -> anyhow::Result<()> {
        if self.uploads.max_body_bytes == 0 {
            anyhow::bail!("uploads.max_body_bytes must be greater than 0");
        }

        Ok(())
    }
}
