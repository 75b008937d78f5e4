use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use empire_blog::application::context::AppContext;
use empire_blog::config::Settings;
use empire_blog::infrastructure::db::memory::AiGenerationStoreMemory;
use empire_blog::infrastructure::db::repositories::Repositories;
use empire_blog::interface::http;
use empire_blog::interface::http::state::AppState;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::util::ServiceExt;

const SESSION: &str = "editor-session";

async fn chat_completions(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer or-key");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": {"message": "bad key"}})));
    }
    if body["model"] == "vendor/broken-model" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": {"message": "model not available"}})),
        );
    }
    let max_tokens = body["max_tokens"].as_u64().unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({
            "choices": [{"message": {"content": format!("generated with {max_tokens}")}}],
            "usage": {"total_tokens": 42}
        })),
    )
}

async fn transcribe(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "text": format!("transcript of {}", body["platform"].as_str().unwrap_or_default()),
        "metadata": {"duration": 61}
    }))
}

async fn start_provider() -> String {
    let app = Router::new()
        .route("/chat/completions", post(chat_completions))
        .route("/v1/transcribe", post(transcribe));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn setup_state(base_url: &str) -> (AppState, Arc<AiGenerationStoreMemory>) {
    let mut settings = Settings::local();
    settings.auth.session_tokens = vec![SESSION.to_string()];
    settings.ai.base_url = base_url.to_string();
    settings.ai.api_key = Some("or-key".to_string());
    settings.transcription.base_url = base_url.to_string();
    settings.transcription.api_key = Some("sc-key".to_string());
    let generations = Arc::new(AiGenerationStoreMemory::default());
    let mut repos = Repositories::in_memory();
    repos.ai_generation = generations.clone();
    let ctx = AppContext::new(repos, Arc::new(settings), reqwest::Client::new());
    (
        AppState {
            ctx: Arc::new(ctx),
            metrics: None,
        },
        generations,
    )
}

async fn call(state: AppState, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = http::app(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("authorization", format!("Bearer {SESSION}"))
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn given_post_request_when_generated_should_return_content_and_record_usage() {
    let base = start_provider().await;
    let (state, generations) = setup_state(&base);

    let (status, json) = call(
        state,
        "/api/v1/ai/generate",
        json!({"type": "post", "prompt": "async rust", "wordCount": 2000}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["content"], "generated with 3000");
    assert_eq!(json["data"]["model"], "gemini-2.0-flash-exp:free");
    assert_eq!(json["data"]["tokens"], 42);
    let recorded = generations.snapshot();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].kind, "post");
    assert_eq!(recorded[0].tokens_used, Some(42));
    assert!(recorded[0].prompt.contains("async rust"));
}

#[tokio::test]
async fn given_provider_rejection_when_generated_should_surface_message() {
    let base = start_provider().await;
    let (state, generations) = setup_state(&base);

    let (status, json) = call(
        state,
        "/api/v1/ai/generate",
        json!({"type": "title", "prompt": "x", "model": "vendor/broken-model"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "model not available");
    assert!(generations.snapshot().is_empty());
}

#[tokio::test]
async fn given_missing_session_when_generating_should_reject() {
    let base = start_provider().await;
    let (state, _) = setup_state(&base);

    let response = http::app(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/ai/generate")
                .header("content-type", "application/json")
                .body(Body::from(json!({"type": "post", "prompt": "x"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn given_youtube_url_when_transcribed_should_return_text_and_record() {
    let base = start_provider().await;
    let (state, generations) = setup_state(&base);

    let (status, json) = call(
        state,
        "/api/v1/transcribe",
        json!({"url": "https://youtu.be/abc"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["transcription"], "transcript of youtube");
    assert_eq!(json["data"]["platform"], "youtube");
    assert_eq!(json["data"]["metadata"]["duration"], 61);
    let recorded = generations.snapshot();
    assert_eq!(recorded[0].kind, "transcription");
    assert_eq!(recorded[0].model, "scrapecreators");
}

#[tokio::test]
async fn given_unsupported_platform_when_transcribed_should_return_bad_request() {
    let base = start_provider().await;
    let (state, _) = setup_state(&base);

    let (status, _) = call(state, "/api/v1/transcribe", json!({"url": "https://vimeo.com/1"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_unreachable_provider_when_transcribed_should_offer_fallback() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let (state, _) = setup_state(&format!("http://{addr}"));

    let (status, json) = call(
        state,
        "/api/v1/transcribe",
        json!({"url": "https://www.instagram.com/reel/x/"}),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["fallback"], true);
}
