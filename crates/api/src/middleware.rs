use std::time::{Duration, Instant};

use axum::{
    body::{Body, HttpBody},
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::{error, info};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Log one line per request: `METHOD URI` with status, latency and size.
///
/// 2xx responses log at `info`, everything else at `error`. Each request
/// gets a v7 UUID, echoed back in `x-request-id`.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::now_v7();
    let line = format!("{} {}", req.method(), req.uri());
    let started = Instant::now();

    let mut response = next.run(req).await;

    let status = response.status().as_u16();
    let millis = elapsed_millis(started.elapsed());
    let bytes = response.body().size_hint().exact().unwrap_or(0);

    if response.status().is_success() {
        info!(request_id = %request_id, code = status, millis, bytes, "{line}");
    } else {
        error!(request_id = %request_id, code = status, millis, bytes, "{line}");
    }

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn elapsed_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
