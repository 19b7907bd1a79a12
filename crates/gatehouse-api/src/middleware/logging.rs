//! Access logging for every request.
//!
//! Only the method, path, status, and latency are recorded. Headers are
//! never logged, since `Cookie` and `Set-Cookie` carry session tokens.

use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, info, warn};

/// Log one line per request, at a level chosen by the outcome.
///
/// Server errors log at `warn`. Health probes log at `debug`, since they
/// arrive every few seconds. Everything else logs at `info`.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let latency_ms = millis(started.elapsed());

    if status.is_server_error() {
        warn!(%method, %path, status = status.as_u16(), latency_ms, "Request failed");
    } else if is_probe(&path) && status == StatusCode::OK {
        debug!(%method, %path, status = status.as_u16(), latency_ms, "Health probe");
    } else {
        info!(%method, %path, status = status.as_u16(), latency_ms, "Request handled");
    }

    response
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

fn is_probe(path: &str) -> bool {
    path.starts_with("/api/health")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_paths() {
        assert!(is_probe("/api/health"));
        assert!(is_probe("/api/health/ready"));
        assert!(!is_probe("/api/auth/sign-in"));
    }

    #[test]
    fn test_millis_saturates() {
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }
}
