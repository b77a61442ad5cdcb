//! # Prometheus Metrics
//!
//! HTTP request counts and latency, recorded through the `metrics` facade.
//! The binary installs a Prometheus recorder; without one the macros are
//! no-ops and `/metrics` answers 404.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;

pub const HTTP_REQUESTS_TOTAL: &str = "spa_http_requests_total";
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "spa_http_request_duration_seconds";
pub const DASHBOARD_UPDATES_TOTAL: &str = "spa_dashboard_updates_total";

/// Label for requests that matched no route.
const UNMATCHED_PATH: &str = "unmatched";

/// Register help text for every metric. Call once after installing the recorder.
pub fn describe() {
    metrics::describe_counter!(HTTP_REQUESTS_TOTAL, "Total HTTP requests");
    metrics::describe_histogram!(
        HTTP_REQUEST_DURATION_SECONDS,
        metrics::Unit::Seconds,
        "HTTP request duration in seconds"
    );
    metrics::describe_counter!(DASHBOARD_UPDATES_TOTAL, "Reactive dashboard updates served");
}

/// Record one completed request.
pub fn record_request(method: &str, path: &str, status: u16, seconds: f64) {
    metrics::counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        HTTP_REQUEST_DURATION_SECONDS,
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(seconds);
}

/// Middleware that records HTTP request metrics, labelled by route template.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    record_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );
    response
}
