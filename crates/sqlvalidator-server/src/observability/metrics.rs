//! Prometheus metrics for sqlvalidator

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::Result;
use crate::error::Error;

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
static START_TIME: OnceLock<Instant> = OnceLock::new();

// Server metrics
const METRIC_UPTIME: &str = "sqlvalidator_uptime_seconds";
const METRIC_INFO: &str = "sqlvalidator_info";
const METRIC_REQUESTS: &str = "sqlvalidator_requests_total";

// Validation metrics
const METRIC_VALIDATION_DURATION: &str = "sqlvalidator_validation_duration_seconds";
const METRIC_VERDICTS: &str = "sqlvalidator_verdicts_total";
const METRIC_SUPPRESSED: &str = "sqlvalidator_suppressed_violations_total";
const METRIC_REJECTED_FUNCTIONS: &str = "sqlvalidator_rejected_functions_total";

/// Initialize Prometheus metrics recorder.
pub fn init_metrics() -> Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| Error::Config(format!("Failed to install metrics recorder: {e}")))?;

    PROMETHEUS_HANDLE.set(handle).ok();
    START_TIME.set(Instant::now()).ok();

    register_metrics();
    tracing::info!("Prometheus metrics initialized");
    Ok(())
}

fn register_metrics() {
    describe_gauge!(METRIC_UPTIME, "Server uptime in seconds");
    describe_gauge!(METRIC_INFO, "Server information (always 1)");
    describe_counter!(METRIC_REQUESTS, "Total HTTP requests by endpoint and status");

    describe_histogram!(
        METRIC_VALIDATION_DURATION,
        "Validation duration in seconds"
    );
    describe_counter!(METRIC_VERDICTS, "Validation verdicts by outcome");
    describe_counter!(
        METRIC_SUPPRESSED,
        "Linter violations dropped as placeholder false positives"
    );
    describe_counter!(
        METRIC_REJECTED_FUNCTIONS,
        "Function calls outside the whitelist"
    );

    gauge!(
        METRIC_INFO,
        "version" => env!("CARGO_PKG_VERSION"),
    )
    .set(1.0);
}

/// Render metrics in Prometheus text format.
#[must_use]
pub fn render_metrics() -> String {
    if let Some(start) = START_TIME.get() {
        gauge!(METRIC_UPTIME).set(start.elapsed().as_secs_f64());
    }

    PROMETHEUS_HANDLE
        .get()
        .map(PrometheusHandle::render)
        .unwrap_or_default()
}

/// Record an HTTP request.
pub fn record_request(endpoint: &str, status: u16) {
    counter!(
        METRIC_REQUESTS,
        "endpoint" => endpoint.to_owned(),
        "status" => status.to_string(),
    )
    .increment(1);
}

/// Record a completed validation.
pub fn record_validation(endpoint: &str, duration: Duration, valid: bool) {
    let verdict = if valid { "valid" } else { "invalid" };

    histogram!(METRIC_VALIDATION_DURATION, "endpoint" => endpoint.to_owned())
        .record(duration.as_secs_f64());

    counter!(
        METRIC_VERDICTS,
        "endpoint" => endpoint.to_owned(),
        "verdict" => verdict.to_owned(),
    )
    .increment(1);
}

/// Record violations suppressed by the placeholder filter.
pub fn record_suppressed_violations(count: usize) {
    counter!(METRIC_SUPPRESSED).increment(count as u64);
}

/// Record function calls rejected by the whitelist.
pub fn record_rejected_functions(count: usize) {
    if count > 0 {
        counter!(METRIC_REJECTED_FUNCTIONS).increment(count as u64);
    }
}
