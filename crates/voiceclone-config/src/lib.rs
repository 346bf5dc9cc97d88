#![allow(clippy::must_use_candidate)]

pub mod cors;
pub mod credentials;
mod env;
pub mod health;
mod loader;
pub mod server;
pub mod telemetry;
pub mod uploads;
pub mod voice_cloning;

use serde::Deserialize;

pub use cors::*;
pub use credentials::Credentials;
pub use health::*;
pub use server::*;
pub use telemetry::{LogFormat, TelemetryConfig};
pub use uploads::*;
pub use voice_cloning::*;

/// Top-level gateway configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Transient upload storage
    #[serde(default)]
    pub uploads: UploadsConfig,
    /// External voice cloning provider
    #[serde(default)]
    pub voice_cloning_api: VoiceCloningApiConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
