// HTTP routes: API key management.

use crate::application::usecases::create_api_key::{
    CreateApiKeyCommand, CreateApiKeyError, CreateApiKeyUseCase,
};
use crate::application::usecases::list_api_keys::ListApiKeysUseCase;
use crate::interface::http::dto::api_keys::{ApiKeyResponse, CreateApiKeyRequest};
use crate::interface::http::dto::parse_timestamp;
use crate::interface::http::problem::{
    VALIDATION_FAILED, data_response, error_response, json_body, storage_unavailable,
};
use crate::interface::http::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;

/// Builds the API key management routes.
pub fn router() -> axum::Router<AppState> {
    axum::Router::new().route("/api/v1/api-keys", get(list_keys).post(create_key))
}

/// Lists keys with the token masked.
async fn list_keys(State(state): State<AppState>) -> Response {
    match ListApiKeysUseCase::execute(&state.ctx).await {
        Ok(rows) => {
            let data: Vec<ApiKeyResponse> = rows.into_iter().map(Into::into).collect();
            data_response(StatusCode::OK, data)
        }
        Err(_) => storage_unavailable(),
    }
}

/// Issues a key. The full token is only ever returned here.
async fn create_key(
    State(state): State<AppState>,
    payload: Result<Json<CreateApiKeyRequest>, JsonRejection>,
) -> Response {
    // Step 1: Decode the body.
    let payload = match json_body(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    let expires_at = match parse_timestamp(payload.expires_at.as_deref(), "expires_at") {
        Ok(at) => at,
        Err(message) => {
            return error_response(StatusCode::BAD_REQUEST, VALIDATION_FAILED, message);
        }
    };

    // Step 2: Execute the use case.
    let result = CreateApiKeyUseCase::execute(
        &state.ctx,
        CreateApiKeyCommand {
            name: payload.name,
            permissions: payload.permissions,
            expires_at,
        },
    )
    .await;

    // Step 3: Map output to HTTP response.
    match result {
        Ok(row) => data_response(StatusCode::CREATED, ApiKeyResponse::from(row)),
        Err(CreateApiKeyError::Validation(message)) => {
            error_response(StatusCode::BAD_REQUEST, VALIDATION_FAILED, message)
        }
        Err(CreateApiKeyError::Storage(_)) => storage_unavailable(),
    }
}
