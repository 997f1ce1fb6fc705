use axum::{Router, extract::Request, middleware::Next, response::Response, routing::get};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use crate::logging::route_of;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

const DURATION_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// Check if observability is enabled via OBSERVABILITY_ENABLED env var
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| parse_flag(&v))
            .unwrap_or(true)
    })
}

fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    !(value.eq_ignore_ascii_case("false") || value == "0")
}

/// Installs the Prometheus recorder and its upkeep task.
///
/// Returns `Ok(None)` when observability is disabled.
pub fn init_metrics() -> Result<Option<PrometheusHandle>, BuildError> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            DURATION_BUCKETS,
        )?
        .install_recorder()?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

/// Metrics middleware to track HTTP requests
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = route_of(&req);

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(latency);

    gauge!("http_requests_active").decrement(1.0);

    response
}

/// `GET /metrics` in Prometheus exposition format.
pub fn metrics_app<S>(handle: PrometheusHandle) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

// Business metrics helpers

pub fn track_faculty_created() {
    if !is_observability_enabled() {
        return;
    }
    counter!("faculties_created_total").increment(1);
}

pub fn track_student_enrolled() {
    if !is_observability_enabled() {
        return;
    }
    counter!("students_enrolled_total").increment(1);
}

/// Counts students moved between faculties, by association kind.
pub fn track_students_transferred(kind: &'static str, count: usize) {
    if !is_observability_enabled() {
        return;
    }
    counter!("students_transferred_total", "kind" => kind).increment(count as u64);
}

pub fn track_avatar_uploaded(size_bytes: usize) {
    if !is_observability_enabled() {
        return;
    }
    counter!("avatars_uploaded_total").increment(1);
    histogram!("avatar_upload_bytes").record(size_bytes as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("FALSE"));
        assert!(!parse_flag(" 0 "));
    }
}
