//! Lightweight telemetry for the notification gateway: a subscriber
//! installer configured from the environment, plus label and counter helpers
//! over the `metrics` facade.

mod config;
mod context;
mod metrics;

pub use config::TelemetryConfig;
pub use context::TelemetryLabels;
pub use metrics::record_counter;

use std::sync::OnceLock;

use anyhow::Result;
use tracing_subscriber::layer::Layer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: OnceLock<()> = OnceLock::new();

/// Installs the fmt subscriber configured from `RUST_LOG`. Subsequent calls
/// are no-ops, so tests and embedded binaries can call it freely.
pub fn init_telemetry(cfg: TelemetryConfig) -> Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    let fmt_layer = if cfg.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!(
        service = %cfg.service_name,
        version = %cfg.service_version,
        environment = %cfg.environment,
        "telemetry installed"
    );

    INIT.set(()).ok();
    Ok(())
}
