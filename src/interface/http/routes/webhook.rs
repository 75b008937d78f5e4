// HTTP routes: webhook subscriptions.

use crate::application::usecases::list_webhook_deliveries::{
    ListWebhookDeliveriesError, ListWebhookDeliveriesUseCase,
};
use crate::application::usecases::list_webhooks::ListWebhooksUseCase;
use crate::application::usecases::register_webhook::{
    RegisterWebhookCommand, RegisterWebhookError, RegisterWebhookUseCase,
};
use crate::application::usecases::unregister_webhook::{
    UnregisterWebhookCommand, UnregisterWebhookError, UnregisterWebhookUseCase,
};
use crate::interface::http::dto::webhook::{
    DeliveryResponse, ListDeliveriesParams, RegisterWebhookRequest, UnregisterWebhookResponse,
    WebhookResponse,
};
use crate::interface::http::problem::{
    NOT_FOUND, REQUEST_MALFORMED, VALIDATION_FAILED, data_response, error_response, json_body,
    query_params, storage_unavailable,
};
use crate::interface::http::state::AppState;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};

/// Builds webhook routes.
pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/api/v1/webhooks", get(list_webhooks).post(register_webhook))
        .route("/api/v1/webhooks/:webhook_id", delete(unregister_webhook))
        .route(
            "/api/v1/webhooks/:webhook_id/deliveries",
            get(list_deliveries),
        )
}

fn parse_webhook_id(raw: &str) -> Result<uuid::Uuid, Response> {
    uuid::Uuid::parse_str(raw).map_err(|_| {
        error_response(
            StatusCode::BAD_REQUEST,
            REQUEST_MALFORMED,
            "invalid webhook id",
        )
    })
}

fn webhook_not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, NOT_FOUND, "Webhook not found")
}

/// Lists subscriptions; secrets are masked.
async fn list_webhooks(State(state): State<AppState>) -> Response {
    match ListWebhooksUseCase::execute(&state.ctx).await {
        Ok(rows) => {
            let data: Vec<WebhookResponse> = rows.into_iter().map(Into::into).collect();
            data_response(StatusCode::OK, data)
        }
        Err(_) => storage_unavailable(),
    }
}

/// Registers a webhook.
async fn register_webhook(
    State(state): State<AppState>,
    payload: Result<Json<RegisterWebhookRequest>, JsonRejection>,
) -> Response {
    // Step 1: Decode the body.
    let payload = match json_body(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    // Step 2: Execute the use case.
    let result = RegisterWebhookUseCase::execute(
        &state.ctx,
        RegisterWebhookCommand {
            name: payload.name,
            url: payload.url,
            secret: payload.secret,
            events: payload.events,
            is_active: payload.is_active,
        },
    )
    .await;

    // Step 3: Map output to HTTP response.
    match result {
        Ok(row) => data_response(StatusCode::CREATED, WebhookResponse::from(row)),
        Err(RegisterWebhookError::Validation(message)) => {
            error_response(StatusCode::BAD_REQUEST, VALIDATION_FAILED, message)
        }
        Err(RegisterWebhookError::Storage(_)) => storage_unavailable(),
    }
}

/// Unregisters a webhook.
async fn unregister_webhook(
    State(state): State<AppState>,
    Path(webhook_id): Path<String>,
) -> Response {
    let webhook_id = match parse_webhook_id(&webhook_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let result =
        UnregisterWebhookUseCase::execute(&state.ctx, UnregisterWebhookCommand { webhook_id })
            .await;

    match result {
        Ok(out) => Json(UnregisterWebhookResponse {
            deleted: out.deleted,
        })
        .into_response(),
        Err(UnregisterWebhookError::NotFound) => webhook_not_found(),
        Err(UnregisterWebhookError::Storage(_)) => storage_unavailable(),
    }
}

/// Most recent delivery attempts for one webhook.
async fn list_deliveries(
    State(state): State<AppState>,
    Path(webhook_id): Path<String>,
    params: Result<Query<ListDeliveriesParams>, QueryRejection>,
) -> Response {
    let webhook_id = match parse_webhook_id(&webhook_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let params = match query_params(params) {
        Ok(params) => params,
        Err(response) => return response,
    };

    match ListWebhookDeliveriesUseCase::execute(&state.ctx, webhook_id, params.limit).await {
        Ok(rows) => {
            let data: Vec<DeliveryResponse> = rows.into_iter().map(Into::into).collect();
            data_response(StatusCode::OK, data)
        }
        Err(ListWebhookDeliveriesError::NotFound) => webhook_not_found(),
        Err(ListWebhookDeliveriesError::Storage(_)) => storage_unavailable(),
    }
}
