//! Per-request logging
//!
//! Logs method, URI, request content type, response status and latency once
//! the response is ready. `build_router` leaves this layer out in production.

use std::time::Instant;

use axum::{extract::Request, http::header, middleware::Next, response::Response};
use tracing::info;

pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unspecified")
        .to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    info!(
        method = %method,
        uri = %uri,
        content_type = %content_type,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Request handled"
    );

    response
}
