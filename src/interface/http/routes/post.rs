// HTTP routes: posts.

use crate::application::shared::post_view::PostView;
use crate::application::usecases::create_post::{
    CreatePostCommand, CreatePostError, CreatePostUseCase,
};
use crate::application::usecases::delete_post::{DeletePostError, DeletePostUseCase};
use crate::application::usecases::duplicate_post::{DuplicatePostError, DuplicatePostUseCase};
use crate::application::usecases::get_post::{GetPostError, GetPostUseCase};
use crate::application::usecases::list_posts::{ListPostsQuery, ListPostsUseCase};
use crate::application::usecases::update_post::{
    UpdatePostCommand, UpdatePostError, UpdatePostUseCase,
};
use crate::interface::http::auth::AuthenticatedKey;
use crate::interface::http::dto::parse_timestamp;
use crate::interface::http::dto::post::{
    CreatePostRequest, DeletePostResponse, ListMeta, ListPostsParams, UpdatePostRequest,
};
use crate::interface::http::problem::{
    CONFLICT, NOT_FOUND, VALIDATION_FAILED, data_response, error_response, json_body,
    query_params, storage_unavailable,
};
use crate::interface::http::state::AppState;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};

/// Builds post routes.
pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/api/v1/posts", get(list_posts).post(create_post))
        .route(
            "/api/v1/posts/:slug",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/api/v1/posts/:slug/duplicate", post(duplicate_post))
}

fn post_not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, NOT_FOUND, "Post not found")
}

fn slug_taken() -> Response {
    error_response(
        StatusCode::CONFLICT,
        CONFLICT,
        "a post with this slug already exists",
    )
}

fn invalid(message: String) -> Response {
    error_response(StatusCode::BAD_REQUEST, VALIDATION_FAILED, message)
}

async fn list_posts(
    State(state): State<AppState>,
    params: Result<Query<ListPostsParams>, QueryRejection>,
) -> Response {
    let params = match query_params(params) {
        Ok(params) => params,
        Err(response) => return response,
    };

    let result = ListPostsUseCase::execute(
        &state.ctx,
        ListPostsQuery {
            status: params.status,
            category: params.category,
            tag: params.tag,
            search: params.search,
            limit: params.limit,
            offset: params.offset,
        },
    )
    .await;

    match result {
        Ok(page) => {
            let posts: Vec<PostView> = page.posts.iter().map(PostView::from).collect();
            let meta = ListMeta {
                total: page.total,
                limit: page.limit,
                offset: page.offset,
            };
            Json(serde_json::json!({ "data": posts, "meta": meta })).into_response()
        }
        Err(_) => storage_unavailable(),
    }
}

async fn create_post(
    State(state): State<AppState>,
    Extension(key): Extension<AuthenticatedKey>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Response {
    // Step 1: Decode the body.
    let payload = match json_body(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    let scheduled_at = match parse_timestamp(payload.scheduled_at.as_deref(), "scheduled_at") {
        Ok(at) => at,
        Err(message) => return invalid(message),
    };

    // Step 2: Execute the use case; the authenticating key is the author.
    let result = CreatePostUseCase::execute(
        &state.ctx,
        CreatePostCommand {
            title: payload.title,
            content: payload.content,
            excerpt: payload.excerpt,
            featured_image: payload.featured_image,
            status: payload.status,
            category_slug: payload.category_slug,
            tag_slugs: payload.tag_slugs,
            meta_title: payload.meta_title,
            meta_description: payload.meta_description,
            scheduled_at,
            author_id: Some(key.key_id),
        },
    )
    .await;

    // Step 3: Map output to HTTP response.
    match result {
        Ok(out) => data_response(StatusCode::CREATED, PostView::from(&out.post)),
        Err(CreatePostError::Validation(message)) => invalid(message),
        Err(CreatePostError::Conflict) => slug_taken(),
        Err(CreatePostError::Storage(_)) => storage_unavailable(),
    }
}

async fn get_post(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match GetPostUseCase::execute(&state.ctx, &slug).await {
        Ok(row) => data_response(StatusCode::OK, PostView::from(&row)),
        Err(GetPostError::NotFound) => post_not_found(),
        Err(GetPostError::Storage(_)) => storage_unavailable(),
    }
}

async fn update_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> Response {
    // Step 1: Decode the body.
    let payload = match json_body(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    let scheduled_at = match parse_timestamp(payload.scheduled_at.as_deref(), "scheduled_at") {
        Ok(at) => at,
        Err(message) => return invalid(message),
    };

    // Step 2: Execute the use case.
    let result = UpdatePostUseCase::execute(
        &state.ctx,
        UpdatePostCommand {
            slug,
            title: payload.title,
            content: payload.content,
            excerpt: payload.excerpt,
            featured_image: payload.featured_image,
            status: payload.status,
            category_slug: payload.category_slug,
            tag_slugs: payload.tag_slugs,
            meta_title: payload.meta_title,
            meta_description: payload.meta_description,
            scheduled_at,
        },
    )
    .await;

    // Step 3: Map output to HTTP response.
    match result {
        Ok(out) => data_response(StatusCode::OK, PostView::from(&out.post)),
        Err(UpdatePostError::NotFound) => post_not_found(),
        Err(UpdatePostError::Validation(message)) => invalid(message),
        Err(UpdatePostError::Conflict) => slug_taken(),
        Err(UpdatePostError::Modified) => error_response(
            StatusCode::CONFLICT,
            CONFLICT,
            "post was modified concurrently; reload and retry",
        ),
        Err(UpdatePostError::Storage(_)) => storage_unavailable(),
    }
}

async fn delete_post(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match DeletePostUseCase::execute(&state.ctx, &slug).await {
        Ok(_) => Json(DeletePostResponse { success: true }).into_response(),
        Err(DeletePostError::NotFound) => post_not_found(),
        Err(DeletePostError::Storage(_)) => storage_unavailable(),
    }
}

async fn duplicate_post(
    State(state): State<AppState>,
    Extension(key): Extension<AuthenticatedKey>,
    Path(slug): Path<String>,
) -> Response {
    match DuplicatePostUseCase::execute(&state.ctx, &slug, Some(key.key_id)).await {
        Ok(out) => data_response(StatusCode::CREATED, PostView::from(&out.post)),
        Err(DuplicatePostError::NotFound) => post_not_found(),
        Err(DuplicatePostError::Conflict) => slug_taken(),
        Err(DuplicatePostError::Storage(_)) => storage_unavailable(),
    }
}
