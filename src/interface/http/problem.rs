use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// Stable, machine-readable code.
    pub code: &'static str,
    /// Set on transcription outages so clients can offer manual entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
}

/// Build an error response with the shared `{error, code}` body.
pub fn error_response(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    let body = ErrorBody {
        error: message.into(),
        code,
        fallback: None,
    };
    (status, Json(body)).into_response()
}

/// Like [`error_response`], with `fallback: true` in the body.
pub fn error_response_with_fallback(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> Response {
    let body = ErrorBody {
        error: message.into(),
        code,
        fallback: Some(true),
    };
    (status, Json(body)).into_response()
}

/// Successful body: `{ "data": ... }`.
pub fn data_response<T: Serialize>(status: StatusCode, data: T) -> Response {
    (status, Json(serde_json::json!({ "data": data }))).into_response()
}

pub fn storage_unavailable() -> Response {
    error_response(
        StatusCode::SERVICE_UNAVAILABLE,
        STORAGE_UNAVAILABLE,
        "storage unavailable",
    )
}

/// Unwrap a JSON body or answer 400 with the parser's reason.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    payload.map(|Json(value)| value).map_err(|rejection| {
        error_response(
            StatusCode::BAD_REQUEST,
            REQUEST_MALFORMED,
            rejection.body_text(),
        )
    })
}

/// Unwrap query parameters or answer 400.
pub fn query_params<T>(
    query: Result<axum::extract::Query<T>, QueryRejection>,
) -> Result<T, Response> {
    query.map(|q| q.0).map_err(|rejection| {
        error_response(
            StatusCode::BAD_REQUEST,
            REQUEST_MALFORMED,
            rejection.body_text(),
        )
    })
}

pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
pub const REQUEST_MALFORMED: &str = "REQUEST_MALFORMED";
pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const CONFLICT: &str = "CONFLICT";
pub const PROVIDER_FAILED: &str = "PROVIDER_FAILED";
pub const PROVIDER_UNAVAILABLE: &str = "PROVIDER_UNAVAILABLE";
pub const STORAGE_UNAVAILABLE: &str = "STORAGE_UNAVAILABLE";
