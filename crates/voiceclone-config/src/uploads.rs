use std::path::PathBuf;

use serde::Deserialize;

/// Default body limit for multipart uploads (32 MiB)
const DEFAULT_MAX_BODY_BYTES: usize = 32 << 20;

/// Where and how large transient uploads may be
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadsConfig {
    /// Directory for request-scoped temp files
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
    /// Maximum accepted request body size in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            temp_dir: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl UploadsConfig {
    /// Configured temp directory, or `voiceclone` under the system temp dir
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("voiceclone"))
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}
