//! Metrics collection and exposition.
//!
//! # Metrics
//! - `echo_requests_total` (counter): requests by service, method, status
//! - `echo_request_duration_seconds` (histogram): latency by service, method
//!
//! Recording goes through the `metrics` facade, so it is a no-op until a
//! recorder is installed with [`init_metrics`].

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::services::ServiceKind;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a completed request.
pub fn record_request(service: ServiceKind, method: &str, status: u16, start: Instant) {
    let service = service.as_str();
    metrics::counter!(
        "echo_requests_total",
        "service" => service,
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "echo_request_duration_seconds",
        "service" => service,
        "method" => method.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Middleware recording every request passing through a service router.
pub async fn track_requests(
    State(service): State<ServiceKind>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let response = next.run(request).await;
    record_request(service, &method, response.status().as_u16(), start);
    response
}
