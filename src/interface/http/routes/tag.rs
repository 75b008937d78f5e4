// HTTP routes: tags.

use crate::application::usecases::create_tag::{CreateTagError, CreateTagUseCase};
use crate::application::usecases::list_tags::ListTagsUseCase;
use crate::interface::http::dto::taxonomy::{CreateTagRequest, TagResponse};
use crate::interface::http::problem::{
    CONFLICT, VALIDATION_FAILED, data_response, error_response, json_body, storage_unavailable,
};
use crate::interface::http::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;

pub fn router() -> axum::Router<AppState> {
    axum::Router::new().route("/api/v1/tags", get(list_tags).post(create_tag))
}

async fn list_tags(State(state): State<AppState>) -> Response {
    match ListTagsUseCase::execute(&state.ctx).await {
        Ok(rows) => {
            let data: Vec<TagResponse> = rows.into_iter().map(Into::into).collect();
            data_response(StatusCode::OK, data)
        }
        Err(_) => storage_unavailable(),
    }
}

async fn create_tag(
    State(state): State<AppState>,
    payload: Result<Json<CreateTagRequest>, JsonRejection>,
) -> Response {
    let payload = match json_body(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    match CreateTagUseCase::execute(&state.ctx, &payload.name).await {
        Ok(row) => data_response(StatusCode::CREATED, TagResponse::from(row)),
        Err(CreateTagError::Validation(message)) => {
            error_response(StatusCode::BAD_REQUEST, VALIDATION_FAILED, message)
        }
        Err(CreateTagError::Conflict) => error_response(
            StatusCode::CONFLICT,
            CONFLICT,
            "a tag with this slug already exists",
        ),
        Err(CreateTagError::Storage(_)) => storage_unavailable(),
    }
}
