// HTTP routes: AI text generation.

use crate::application::usecases::generate_content::{
    GenerateContentCommand, GenerateContentError, GenerateContentUseCase,
};
use crate::infrastructure::providers::ProviderError;
use crate::interface::http::dto::ai::{GenerateRequest, GenerateResponse};
use crate::interface::http::problem::{
    PROVIDER_FAILED, PROVIDER_UNAVAILABLE, VALIDATION_FAILED, data_response, error_response,
    json_body,
};
use crate::interface::http::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::post;

pub fn router() -> axum::Router<AppState> {
    axum::Router::new().route("/api/v1/ai/generate", post(generate))
}

/// Provider failures as HTTP: unreachable is 503, everything else 500.
pub(crate) fn provider_failure(err: ProviderError) -> Response {
    match err {
        ProviderError::Unavailable(_) => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            PROVIDER_UNAVAILABLE,
            "provider unavailable",
        ),
        other => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            PROVIDER_FAILED,
            other.to_string(),
        ),
    }
}

async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let payload = match json_body(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    let result = GenerateContentUseCase::execute(
        &state.ctx,
        GenerateContentCommand {
            kind: payload.kind,
            prompt: payload.prompt,
            content: payload.content,
            context: payload.context,
            model: payload.model,
            tone: payload.tone,
            word_count: payload.word_count,
        },
    )
    .await;

    match result {
        Ok(out) => data_response(
            StatusCode::OK,
            GenerateResponse {
                content: out.content,
                model: out.model,
                tokens: out.tokens,
            },
        ),
        Err(GenerateContentError::Validation(message)) => {
            error_response(StatusCode::BAD_REQUEST, VALIDATION_FAILED, message)
        }
        Err(GenerateContentError::Provider(err)) => provider_failure(err),
    }
}
