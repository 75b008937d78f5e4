// HTTP routes: categories.

use crate::application::usecases::create_category::{
    CreateCategoryCommand, CreateCategoryError, CreateCategoryUseCase,
};
use crate::application::usecases::list_categories::ListCategoriesUseCase;
use crate::interface::http::dto::taxonomy::{CategoryResponse, CreateCategoryRequest};
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
    axum::Router::new().route(
        "/api/v1/categories",
        get(list_categories).post(create_category),
    )
}

async fn list_categories(State(state): State<AppState>) -> Response {
    match ListCategoriesUseCase::execute(&state.ctx).await {
        Ok(rows) => {
            let data: Vec<CategoryResponse> = rows.into_iter().map(Into::into).collect();
            data_response(StatusCode::OK, data)
        }
        Err(_) => storage_unavailable(),
    }
}

async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Response {
    let payload = match json_body(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    let result = CreateCategoryUseCase::execute(
        &state.ctx,
        CreateCategoryCommand {
            name: payload.name,
            description: payload.description,
        },
    )
    .await;

    match result {
        Ok(row) => data_response(StatusCode::CREATED, CategoryResponse::from(row)),
        Err(CreateCategoryError::Validation(message)) => {
            error_response(StatusCode::BAD_REQUEST, VALIDATION_FAILED, message)
        }
        Err(CreateCategoryError::Conflict) => error_response(
            StatusCode::CONFLICT,
            CONFLICT,
            "a category with this slug already exists",
        ),
        Err(CreateCategoryError::Storage(_)) => storage_unavailable(),
    }
}
