use std::sync::Arc;

use voiceclone_config::{Credentials, DelegateMode};

use crate::{
    delegate::{VoiceDelegate, live::LiveDelegate, simulated::SimulatedDelegate},
    error::CloneError,
    transient::TransientStore,
    types::{ClonedAudio, Operation, Upload},
};

/// Cloning server that drives the transient store and the delegate
pub struct Server {
    delegate: Arc<dyn VoiceDelegate>,
    store: TransientStore,
}

impl Server {
    pub fn new(delegate: Arc<dyn VoiceDelegate>, store: TransientStore) -> Self {
        Self { delegate, store }
    }

    /// Save the upload, clone the voice in it, and remove the upload again
    pub async fn clone_voice(&self, upload: &Upload) -> crate::error::Result<ClonedAudio> {
        let operation = Operation::CloneVoice;

        let sample = self
            .store
            .save(operation.slot(), &upload.filename, &upload.bytes)
            .await
            .map_err(|e| internal(operation, e))?;

        let outcome = self.delegate.clone_voice(sample.path()).await;
        sample.delete().await;

        outcome.map_err(|e| delegate_failure(operation, self.delegate.name(), e))
    }

    /// Save the sample, synthesize `text` in its voice, and remove the sample again
    pub async fn text_to_cloned_speech(&self, text: &str, upload: &Upload) -> crate::error::Result<ClonedAudio> {
        let operation = Operation::TextToClonedSpeech;

        let sample = self
            .store
            .save(operation.slot(), &upload.filename, &upload.bytes)
            .await
            .map_err(|e| internal(operation, e))?;

        let outcome = self.delegate.synthesize(text, sample.path()).await;
        sample.delete().await;

        outcome.map_err(|e| delegate_failure(operation, self.delegate.name(), e))
    }
}

fn internal(operation: Operation, error: std::io::Error) -> CloneError {
    tracing::error!(%operation, "failed to save transient upload: {error}");
    CloneError::internal(operation, error)
}

fn delegate_failure(operation: Operation, delegate: &str, error: crate::error::DelegateError) -> CloneError {
    tracing::warn!(%operation, delegate, "delegate failed: {error}");
    CloneError::delegate(operation, error)
}

/// Builder for constructing the cloning server from configuration
pub struct CloningServerBuilder<'a> {
    config: &'a voiceclone_config::Config,
}

impl<'a> CloningServerBuilder<'a> {
    pub const fn new(config: &'a voiceclone_config::Config) -> Self {
        Self { config }
    }

    /// # Errors
    ///
    /// Returns an error if the temp directory cannot be created, the timeout
    /// is invalid, or the provider HTTP client cannot be built
    pub fn build(self) -> anyhow::Result<Server> {
        let api = &self.config.voice_cloning_api;
        let credentials = Credentials::load(api);

        let delegate: Arc<dyn VoiceDelegate> = match api.delegate {
            DelegateMode::Simulated => Arc::new(SimulatedDelegate::new(credentials, &api.simulated_base_url)),
            DelegateMode::Live => Arc::new(LiveDelegate::new(credentials, api.wire.clone(), api.timeout()?)?),
        };

        let temp_dir = self.config.uploads.temp_dir();
        let store = TransientStore::new(&temp_dir)
            .map_err(|e| anyhow::anyhow!("failed to create upload directory {}: {e}", temp_dir.display()))?;

        tracing::debug!(
            delegate = delegate.name(),
            temp_dir = %temp_dir.display(),
            "cloning server initialized"
        );

        Ok(Server::new(delegate, store))
    }
}
