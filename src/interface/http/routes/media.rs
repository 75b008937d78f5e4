// HTTP routes: media records.

use crate::application::usecases::create_media::{
    CreateMediaCommand, CreateMediaError, CreateMediaUseCase,
};
use crate::application::usecases::list_media::{ListMediaQuery, ListMediaUseCase};
use crate::interface::http::auth::AuthenticatedKey;
use crate::interface::http::dto::media::{CreateMediaRequest, ListMediaParams, MediaResponse};
use crate::interface::http::problem::{
    VALIDATION_FAILED, data_response, error_response, json_body, query_params,
    storage_unavailable,
};
use crate::interface::http::state::AppState;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;

pub fn router() -> axum::Router<AppState> {
    axum::Router::new().route("/api/v1/media", get(list_media).post(create_media))
}

async fn list_media(
    State(state): State<AppState>,
    params: Result<Query<ListMediaParams>, QueryRejection>,
) -> Response {
    let params = match query_params(params) {
        Ok(params) => params,
        Err(response) => return response,
    };

    let result = ListMediaUseCase::execute(
        &state.ctx,
        ListMediaQuery {
            media_type: params.media_type,
            limit: params.limit,
            offset: params.offset,
        },
    )
    .await;

    match result {
        Ok(rows) => {
            let data: Vec<MediaResponse> = rows.into_iter().map(Into::into).collect();
            data_response(StatusCode::OK, data)
        }
        Err(_) => storage_unavailable(),
    }
}

async fn create_media(
    State(state): State<AppState>,
    Extension(key): Extension<AuthenticatedKey>,
    payload: Result<Json<CreateMediaRequest>, JsonRejection>,
) -> Response {
    let payload = match json_body(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    let result = CreateMediaUseCase::execute(
        &state.ctx,
        CreateMediaCommand {
            filename: payload.filename,
            original_name: payload.original_name,
            url: payload.url,
            media_type: payload.media_type,
            size_bytes: payload.size,
            alt_text: payload.alt_text,
            uploaded_by: Some(key.key_id),
        },
    )
    .await;

    match result {
        Ok(row) => data_response(StatusCode::CREATED, MediaResponse::from(row)),
        Err(CreateMediaError::Validation(message)) => {
            error_response(StatusCode::BAD_REQUEST, VALIDATION_FAILED, message)
        }
        Err(CreateMediaError::Storage(_)) => storage_unavailable(),
    }
}
