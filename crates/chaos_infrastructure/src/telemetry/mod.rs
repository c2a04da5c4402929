//! Tracing initialization

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Subscriber, info};
use tracing_subscriber::{
    EnvFilter, fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter used when `RUST_LOG` is unset
    /// (e.g., "info", "chaos_application=debug")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit JSON lines instead of human-readable text
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "chaos_application=info,chaos_infrastructure=info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            json: false,
        }
    }
}

/// Telemetry errors
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber could not be installed
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Build the subscriber stack, writing formatted events to `writer`
///
/// `RUST_LOG` takes precedence over [`TelemetryConfig::log_filter`].
pub fn subscriber<W>(
    config: &TelemetryConfig,
    writer: W,
) -> impl Subscriber + Send + Sync + use<W>
where
    W: for<'w> MakeWriter<'w> + Clone + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let json_layer = config.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(writer.clone())
    });
    let text_layer = (!config.json).then(move || {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(writer)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
}

/// Install the global tracing subscriber
///
/// Events go to stderr; stdout is reserved for injection reports.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    subscriber(config, std::io::stderr)
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    info!(filter = %config.log_filter, json = config.json, "Tracing initialized");
    Ok(())
}
