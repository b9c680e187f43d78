//! Tracing setup for the directory service: an `EnvFilter`ed fmt subscriber,
//! plus an OTLP span exporter when `OTLP_ENDPOINT` is set.

use anyhow::{Result, anyhow};
use once_cell::sync::OnceCell;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: OnceCell<()> = OnceCell::new();

const SERVICE_NAME: &str = "directory-server";
const DEFAULT_FILTER: &str = "info,tower_http=warn";

/// Tracing settings, normally read straight from the environment.
#[derive(Clone, Debug)]
pub struct ObsConfig {
    pub service_name: &'static str,
    pub filter: String,
    pub otlp_endpoint: Option<String>,
}

impl ObsConfig {
    /// `RUST_LOG` drives the filter (falling back to an info-level default
    /// that quiets tower-http); `OTLP_ENDPOINT` switches span export on.
    pub fn from_env() -> Self {
        Self {
            service_name: SERVICE_NAME,
            filter: std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string()),
            otlp_endpoint: std::env::var("OTLP_ENDPOINT").ok(),
        }
    }
}

/// Install the global tracing subscriber. Safe to call more than once; only
/// the first call wins.
pub fn init_tracing(config: ObsConfig) -> Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.filter)?)
        .with(tracing_subscriber::fmt::layer().with_target(false));

    if let Some(endpoint) = config.otlp_endpoint.as_deref() {
        let provider = span_provider(config.service_name, endpoint)?;
        let tracer = provider.tracer(config.service_name);
        registry
            .with(tracing_opentelemetry::layer().with_tracer(tracer))
            .try_init()?;
    } else {
        registry.try_init()?;
    }

    INIT.set(())
        .map_err(|_| anyhow!("tracing already initialized"))?;
    Ok(())
}

fn span_provider(service_name: &'static str, endpoint: &str) -> Result<SdkTracerProvider> {
    let exporter = SpanExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpBinary)
        .with_endpoint(endpoint)
        .build()?;
    Ok(SdkTracerProvider::builder()
        .with_resource(Resource::builder().with_service_name(service_name).build())
        .with_batch_exporter(exporter)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let config = ObsConfig {
            service_name: SERVICE_NAME,
            filter: "info".to_string(),
            otlp_endpoint: None,
        };
        init_tracing(config.clone()).unwrap();
        // A second call is a no-op, not an error.
        init_tracing(config).unwrap();
    }

    #[test]
    fn bad_filter_directives_are_reported() {
        assert!(EnvFilter::try_new("not==valid==directive").is_err());
    }
}
