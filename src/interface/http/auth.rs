use crate::application::usecases::authenticate_api_key::{
    AuthenticateApiKeyError, AuthenticateApiKeyUseCase,
};
use crate::interface::http::problem::{UNAUTHORIZED, error_response, storage_unavailable};
use crate::interface::http::state::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const SESSION_COOKIE: &str = "eb_session";

/// Who may call a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    ApiKey,
    Session,
    SessionOrApiKey,
}

/// The API key that authorized this request.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedKey {
    pub key_id: uuid::Uuid,
}

/// Marker for requests carrying a valid admin session.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

/// Access rule for a method and path. Reads of content are public; writes need a key.
pub fn access_for(method: &Method, path: &str) -> Access {
    let Some(rest) = path.strip_prefix("/api/v1/") else {
        return Access::Public;
    };
    let resource = rest.split('/').next().unwrap_or_default();
    let read = method == Method::GET || method == Method::HEAD;
    match resource {
        "posts" | "categories" | "tags" | "media" if read => Access::Public,
        "posts" | "categories" | "tags" | "media" => Access::ApiKey,
        "webhooks" if read => Access::SessionOrApiKey,
        "webhooks" => Access::ApiKey,
        "api-keys" | "ai" | "transcribe" => Access::Session,
        _ => Access::Public,
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .map(str::trim)
}

fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
}

fn has_session(state: &AppState, headers: &HeaderMap) -> bool {
    let tokens = &state.ctx.settings.auth.session_tokens;
    [session_cookie(headers), bearer_token(headers)]
        .into_iter()
        .flatten()
        .filter(|token| !token.is_empty())
        .any(|token| tokens.iter().any(|known| known == token))
}

fn unauthorized(message: &str) -> Response {
    error_response(StatusCode::UNAUTHORIZED, UNAUTHORIZED, message)
}

/// Enforces the access rule for the route and attaches the caller identity.
///
/// Rejection always happens before the handler runs, so no write is attempted
/// on behalf of an unauthenticated caller.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    // Step 1: Resolve the access rule.
    let access = access_for(req.method(), req.uri().path());
    if access == Access::Public {
        return Ok(next.run(req).await);
    }

    // Step 2: Admin sessions satisfy session-gated routes.
    let session = has_session(&state, req.headers());
    if session && access != Access::ApiKey {
        req.extensions_mut().insert(AdminSession);
        return Ok(next.run(req).await);
    }
    if access == Access::Session {
        return Err(unauthorized("Unauthorized"));
    }

    // Step 3: Otherwise the request needs a usable API key.
    let presented = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    if access == Access::SessionOrApiKey && presented.is_none() {
        return Err(unauthorized("Unauthorized"));
    }
    match AuthenticateApiKeyUseCase::execute(&state.ctx, presented.as_deref()).await {
        Ok(key) => {
            debug!(key_id = %key.key_id, "api_key_accepted");
            req.extensions_mut().insert(AuthenticatedKey { key_id: key.key_id });
            Ok(next.run(req).await)
        }
        Err(AuthenticateApiKeyError::Missing) => Err(unauthorized("API key required")),
        Err(AuthenticateApiKeyError::Invalid) => Err(unauthorized("Invalid API key")),
        Err(AuthenticateApiKeyError::Storage(_)) => Err(storage_unavailable()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn given_content_reads_when_resolving_access_should_be_public() {
        assert_eq!(access_for(&Method::GET, "/api/v1/posts"), Access::Public);
        assert_eq!(access_for(&Method::GET, "/api/v1/posts/hello"), Access::Public);
        assert_eq!(access_for(&Method::GET, "/api/v1/media"), Access::Public);
        assert_eq!(access_for(&Method::GET, "/health"), Access::Public);
    }

    #[test]
    fn given_content_writes_when_resolving_access_should_need_api_key() {
        assert_eq!(access_for(&Method::POST, "/api/v1/posts"), Access::ApiKey);
        assert_eq!(access_for(&Method::PUT, "/api/v1/posts/hello"), Access::ApiKey);
        assert_eq!(access_for(&Method::DELETE, "/api/v1/posts/hello"), Access::ApiKey);
        assert_eq!(
            access_for(&Method::POST, "/api/v1/posts/hello/duplicate"),
            Access::ApiKey
        );
        assert_eq!(access_for(&Method::POST, "/api/v1/tags"), Access::ApiKey);
        assert_eq!(access_for(&Method::DELETE, "/api/v1/webhooks/abc"), Access::ApiKey);
    }

    #[test]
    fn given_admin_routes_when_resolving_access_should_need_session() {
        assert_eq!(access_for(&Method::GET, "/api/v1/api-keys"), Access::Session);
        assert_eq!(access_for(&Method::POST, "/api/v1/ai/generate"), Access::Session);
        assert_eq!(access_for(&Method::POST, "/api/v1/transcribe"), Access::Session);
        assert_eq!(
            access_for(&Method::GET, "/api/v1/webhooks"),
            Access::SessionOrApiKey
        );
    }

    #[test]
    fn given_cookie_header_when_parsed_should_find_session_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; eb_session=tok123 ; other=1"),
        );
        assert_eq!(session_cookie(&headers), Some("tok123"));
    }

    #[test]
    fn given_bearer_header_when_parsed_should_return_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers), Some("abc"));
    }
}
