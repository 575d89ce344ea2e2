//! Span export to an OTLP collector

use anyhow::{Context, Result};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::{SdkTracer, SdkTracerProvider};

const SERVICE_NAME: &str = "ccctl";
const TRACES_PATH: &str = "/v1/traces";

/// Full OTLP/HTTP traces URL for a collector given as `host:port` or URL
///
/// A bare `host:port` gets `http://`; a URL without a path gets `/v1/traces`.
pub fn traces_endpoint(collector: &str) -> String {
    let collector = collector.trim().trim_end_matches('/');
    let url = if collector.contains("://") {
        collector.to_string()
    } else {
        format!("http://{}", collector)
    };

    let has_path = url
        .split_once("://")
        .is_some_and(|(_, rest)| rest.contains('/'));
    if has_path {
        url
    } else {
        format!("{}{}", url, TRACES_PATH)
    }
}

/// Batch-exporting provider for `collector`
pub fn init_tracer_provider(collector: &str) -> Result<SdkTracerProvider> {
    let endpoint = traces_endpoint(collector);
    let exporter = SpanExporter::builder()
        .with_http()
        .with_endpoint(&endpoint)
        .build()
        .with_context(|| format!("Failed to create span exporter for {}", endpoint))?;

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(Resource::builder().with_service_name(SERVICE_NAME).build())
        .build())
}

pub fn tracer(provider: &SdkTracerProvider) -> SdkTracer {
    provider.tracer(SERVICE_NAME)
}

/// Flush pending spans; export failures only go to stderr
pub fn shutdown(provider: SdkTracerProvider) {
    if let Err(e) = provider.shutdown() {
        eprintln!("warning: failed to flush traces: {}", e);
    }
}
