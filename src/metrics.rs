//! Metrics for request latency, cache effectiveness and order delegation.
//!
//! Everything goes through the `metrics` facade; without an installed
//! recorder the calls are no-ops.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Token cache hits counter metric name.
pub const METRIC_TOKEN_CACHE_HITS: &str = "token_cache_hits_total";
/// Token cache misses counter metric name.
pub const METRIC_TOKEN_CACHE_MISSES: &str = "token_cache_misses_total";
/// Orders submitted counter metric name.
pub const METRIC_ORDERS_SUBMITTED: &str = "orders_submitted_total";
/// Orders failed counter metric name.
pub const METRIC_ORDERS_FAILED: &str = "orders_failed_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP GET requests issued");
    describe_counter!(
        METRIC_TOKEN_CACHE_HITS,
        "Reverse token lookups answered from the cache"
    );
    describe_counter!(
        METRIC_TOKEN_CACHE_MISSES,
        "Reverse token lookups that went to the gamma API"
    );
    describe_counter!(
        METRIC_ORDERS_SUBMITTED,
        "Total number of orders handed to the trading backend"
    );
    describe_counter!(
        METRIC_ORDERS_FAILED,
        "Total number of orders the trading backend rejected"
    );

    debug!("Metrics initialized");
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, api: &'static str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "api" => api).record(latency_ms);
    counter!(METRIC_HTTP_REQUESTS, "api" => api).increment(1);
}

/// Increment token cache hit counter.
pub fn inc_token_cache_hits() {
    counter!(METRIC_TOKEN_CACHE_HITS).increment(1);
}

/// Increment token cache miss counter.
pub fn inc_token_cache_misses() {
    counter!(METRIC_TOKEN_CACHE_MISSES).increment(1);
}

/// Increment order submitted counter.
pub fn inc_orders_submitted() {
    counter!(METRIC_ORDERS_SUBMITTED).increment(1);
}

/// Increment orders failed counter.
pub fn inc_orders_failed() {
    counter!(METRIC_ORDERS_FAILED).increment(1);
}
