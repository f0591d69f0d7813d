//! Prometheus metrics for instance-service.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};

/// Counter for HTTP requests by method, matched path and status.
pub static HTTP_REQUESTS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "instance_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register HTTP_REQUESTS")
});

/// Histogram for database query duration by statement.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "instance_db_query_duration_seconds",
        "Database query duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]
    )
    .expect("Failed to register DB_QUERY_DURATION")
});

/// Counter for instance lifecycle operations.
pub static INSTANCE_OPERATIONS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "instance_operations_total",
        "Total number of instance lifecycle operations",
        &["operation", "status"]
    )
    .expect("Failed to register INSTANCE_OPERATIONS")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&HTTP_REQUESTS);
    Lazy::force(&DB_QUERY_DURATION);
    Lazy::force(&INSTANCE_OPERATIONS);
}

/// Get all metrics as Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16) {
    let status = status.to_string();
    HTTP_REQUESTS
        .with_label_values(&[method, path, status.as_str()])
        .inc();
}

/// Record an instance operation outcome.
pub fn record_instance_operation(operation: &str, status: &str) {
    INSTANCE_OPERATIONS
        .with_label_values(&[operation, status])
        .inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_operations_show_up_in_export() {
        init_metrics();
        record_instance_operation("create", "success");

        let text = get_metrics();
        assert!(text.contains("instance_operations_total"));
    }
}
