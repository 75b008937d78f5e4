//! Logging and metrics setup.

use crate::config::Observability;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing(settings: &Observability) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = if settings.log_format == "json" {
        builder.json().flatten_event(true).try_init()
    } else {
        builder.pretty().try_init()
    };
}

/// Install the Prometheus recorder when metrics are enabled.
pub fn init_metrics(settings: &Observability) -> Result<Option<PrometheusHandle>, BuildError> {
    if !settings.enable_metrics {
        return Ok(None);
    }
    PrometheusBuilder::new()
        .add_global_label("service", settings.service_name.clone())
        .install_recorder()
        .map(Some)
}
