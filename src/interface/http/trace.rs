use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{HeaderName, HeaderValue, Method, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, histogram};
use std::time::Instant;
use tracing::info;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Per-request identifier, echoed in `x-request-id` and every request log line.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Reuses a client-supplied `x-request-id` or mints a UUID, and echoes it back.
pub async fn request_id_middleware(mut req: Request<Body>, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    req.extensions_mut().insert(RequestId(request_id.clone()));

    let mut response = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

fn method_label(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::PATCH => "PATCH",
        Method::DELETE => "DELETE",
        Method::HEAD => "HEAD",
        Method::OPTIONS => "OPTIONS",
        _ => "OTHER",
    }
}

fn status_class(status: u16) -> &'static str {
    match status {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

/// Records request metrics and emits one `http_request` log line per request.
pub async fn request_log_middleware(req: Request<Body>, next: Next) -> Response {
    let method = method_label(req.method());
    let path = req.uri().path().to_string();
    // Route templates keep metric cardinality bounded; slugs stay in the log only.
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let request_id = req.extensions().get::<RequestId>().map(|r| r.0.clone());
    let start = Instant::now();

    let response = next.run(req).await;

    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();
    let class = status_class(status);
    counter!("http_requests_total", "method" => method, "route" => route.clone(), "status" => class)
        .increment(1);
    histogram!("http_request_duration_ms", "method" => method, "route" => route, "status" => class)
        .record(latency_ms as f64);
    info!(
        trace_id = request_id.as_deref().unwrap_or(""),
        method,
        path = %path,
        status,
        latency_ms,
        "http_request"
    );

    response
}
