//! Logging setup for the voice cloning gateway
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a `fmt`
//! layer rendering either text or JSON lines

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use voiceclone_config::{LogFormat, TelemetryConfig};

/// Initialize the global tracing subscriber
///
/// The filter comes from `RUST_LOG` when set, then from the configured
/// `log_filter`, then from `default_filter`.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed
pub fn init(config: Option<&TelemetryConfig>, default_filter: &str) -> anyhow::Result<()> {
    let directive = filter_directive(
        std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
        config.and_then(|c| c.log_filter.as_deref()),
        default_filter,
    );

    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("invalid log filter '{directive}': {e}, falling back to 'info'");
        EnvFilter::new("info")
    });

    let format = config.map(|c| c.format).unwrap_or_default();
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false);

            registry.with(fmt_layer).try_init()
        }
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true);

            registry.with(fmt_layer).try_init()
        }
    }
    .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

/// Pick the first non-empty filter directive
fn filter_directive(env: Option<&str>, configured: Option<&str>, default: &str) -> String {
    [env, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|directive| !directive.is_empty())
        .unwrap_or(default)
        .to_string()
}
