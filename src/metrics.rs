//! Prometheus metrics.
//!
//! Until [`init_metrics`] installs a recorder every helper here is a no-op,
//! which is what the test suite relies on.

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::{Duration, Instant};

const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Installs the global Prometheus recorder and spawns its upkeep task.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            LATENCY_BUCKETS,
        )?
        .install_recorder()?;

    let upkeep = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep.run_upkeep();
        }
    });

    Ok(handle)
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    gauge!("http_requests_active").increment(1.0);
    let response = next.run(req).await;
    gauge!("http_requests_active").decrement(1.0);

    let status = response.status().as_u16().to_string();
    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status)
        .increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(start.elapsed().as_secs_f64());

    response
}

/// Router exposing `GET /metrics`.
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

pub fn track_login_success(role: &str) {
    counter!("account_logins_total", "status" => "success", "role" => role.to_string())
        .increment(1);
}

pub fn track_login_failure(reason: &str) {
    counter!("account_logins_total", "status" => "failure", "reason" => reason.to_string())
        .increment(1);
}

/// `source` is one of `login`, `register`, `elevate`.
pub fn track_token_issued(source: &'static str) {
    counter!("session_tokens_issued_total", "source" => source).increment(1);
}

pub fn track_registration() {
    counter!("accounts_registered_total").increment(1);
}

pub fn track_elevation(granted: bool) {
    let outcome = if granted { "granted" } else { "denied" };
    counter!("account_elevations_total", "outcome" => outcome).increment(1);
}

pub fn track_auth_rejection(reason: &'static str) {
    counter!("auth_rejections_total", "reason" => reason).increment(1);
}
