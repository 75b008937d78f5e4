pub mod auth;
pub mod dto;
pub mod problem;
pub mod routes;
pub mod state;
pub mod trace;

use axum::Router;
use axum::middleware;
use state::AppState;

/// The full HTTP surface with auth, request logging and request ids applied.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::ready::router())
        .merge(routes::metrics::router())
        .merge(routes::post::router())
        .merge(routes::category::router())
        .merge(routes::tag::router())
        .merge(routes::media::router())
        .merge(routes::webhook::router())
        .merge(routes::api_key::router())
        .merge(routes::ai::router())
        .merge(routes::transcribe::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ))
        .layer(middleware::from_fn(trace::request_log_middleware))
        .layer(middleware::from_fn(trace::request_id_middleware))
        .with_state(state)
}
