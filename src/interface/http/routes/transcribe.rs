// HTTP routes: video transcription.

use crate::application::usecases::transcribe_video::{
    TranscribeVideoError, TranscribeVideoUseCase,
};
use crate::infrastructure::providers::ProviderError;
use crate::interface::http::dto::ai::{TranscribeRequest, TranscribeResponse};
use crate::interface::http::problem::{
    PROVIDER_UNAVAILABLE, VALIDATION_FAILED, data_response, error_response,
    error_response_with_fallback, json_body,
};
use crate::interface::http::routes::ai::provider_failure;
use crate::interface::http::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::post;

pub fn router() -> axum::Router<AppState> {
    axum::Router::new().route("/api/v1/transcribe", post(transcribe))
}

async fn transcribe(
    State(state): State<AppState>,
    payload: Result<Json<TranscribeRequest>, JsonRejection>,
) -> Response {
    let payload = match json_body(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    match TranscribeVideoUseCase::execute(&state.ctx, payload.url.as_deref()).await {
        Ok(out) => data_response(
            StatusCode::OK,
            TranscribeResponse {
                transcription: out.transcription,
                platform: out.platform.as_str(),
                url: out.url,
                metadata: out.metadata,
            },
        ),
        Err(TranscribeVideoError::Validation(message)) => {
            error_response(StatusCode::BAD_REQUEST, VALIDATION_FAILED, message)
        }
        // Timeouts and connection failures let the client fall back to manual entry.
        Err(TranscribeVideoError::Provider(ProviderError::Unavailable(_))) => {
            error_response_with_fallback(
                StatusCode::SERVICE_UNAVAILABLE,
                PROVIDER_UNAVAILABLE,
                "transcription service unavailable",
            )
        }
        Err(TranscribeVideoError::Provider(err)) => provider_failure(err),
    }
}
