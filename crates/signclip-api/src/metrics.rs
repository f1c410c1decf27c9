//! Prometheus metrics for the API server.

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
}

/// Metric names as constants for consistency.
pub mod names {
    pub const HTTP_REQUESTS_TOTAL: &str = "signclip_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "signclip_http_request_duration_seconds";

    pub const GENERATIONS_TOTAL: &str = "signclip_generations_total";
    pub const GENERATION_DURATION_SECONDS: &str = "signclip_generation_duration_seconds";
    pub const GENERATION_CLIPS: &str = "signclip_generation_clips";

    pub const RATE_LIMIT_HITS_TOTAL: &str = "signclip_rate_limit_hits_total";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record the outcome of one generation request.
pub fn record_generation(outcome: &str, clip_count: usize, duration_secs: f64) {
    let labels = [("outcome", outcome.to_string())];
    counter!(names::GENERATIONS_TOTAL, &labels).increment(1);
    histogram!(names::GENERATION_DURATION_SECONDS, &labels).record(duration_secs);
    histogram!(names::GENERATION_CLIPS, &labels).record(clip_count as f64);
}

/// Record a rate limit rejection.
pub fn record_rate_limit_hit(path: &str) {
    let labels = [("path", path.to_string())];
    counter!(names::RATE_LIMIT_HITS_TOTAL, &labels).increment(1);
}

/// HTTP metrics middleware.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    record_http_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );

    response
}
