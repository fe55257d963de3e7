//! Tracing subscriber setup.
//!
//! Connects `tracing` macros to the file exporter through
//! `tracing-opentelemetry`. The plugin and its background worker run in
//! separate WASM instances, so each installs its own subscriber under its
//! own service name.

use super::exporter;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Trace file name inside the data directory.
pub const TRACE_FILE: &str = "homescout-otlp.json";

const DEFAULT_LEVEL: &str = "info";

/// Installs the plugin's subscriber.
///
/// The filter comes from `config.trace_level`, defaulting to `"info"`.
/// Spans go to `~/.local/share/zellij/homescout/homescout-otlp.json`.
///
/// Tracing is optional: if the data directory cannot be created nothing is
/// installed. Later calls are no-ops.
///
/// # Example
///
/// ```rust,no_run
/// use homescout::observability::init_tracing;
/// use homescout::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    install(level, "Homescout");
}

/// Installs the worker's subscriber at the default level.
pub fn init_worker_tracing() {
    install(DEFAULT_LEVEL, "Homescout Worker");
}

fn install(level: &str, service: &'static str) {
    let data_dir = paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![KeyValue::new("service.name", service)]);
    let provider = exporter::create_tracer_provider(data_dir.join(TRACE_FILE), resource);
    let layer = OpenTelemetryLayer::new(provider.tracer(service));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(layer)
        .try_init();
}
