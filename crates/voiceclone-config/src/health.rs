use serde::Deserialize;

/// Liveness route served next to the cloning endpoints
///
/// Answers `GET` with a plain `ok` and never touches the provider, so it
/// stays healthy even when credentials are missing.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthConfig {
    /// Set to `false` to leave the route unregistered
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Route path, `/health` unless overridden
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            path: default_path(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_enabled() -> bool {
    true
}

fn default_path() -> String {
    "/health".to_string()
}
