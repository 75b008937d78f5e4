use empire_blog::application::context::AppContext;
use empire_blog::application::usecases::publish_scheduled_posts::PublishScheduledPostsUseCase;
use empire_blog::config;
use empire_blog::infrastructure::db::postgres::PostgresDatabase;
use empire_blog::infrastructure::db::repositories::Repositories;
use empire_blog::interface::http;
use empire_blog::interface::http::state::AppState;
use empire_blog::observability;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() {
    // Step 1: Load configuration and install logging and metrics.
    let settings = Arc::new(config::load().expect("load config"));
    observability::init_tracing(&settings.observability);
    let metrics = observability::init_metrics(&settings.observability).expect("install metrics");

    // Step 2: Build repositories on the configured backend.
    let repos = if settings.uses_memory_store() {
        info!("using in-memory store");
        Repositories::in_memory()
    } else {
        let db = PostgresDatabase::connect(&settings.db.url, settings.db.max_connections)
            .await
            .expect("connect database");
        db.migrate().await.expect("run migrations");
        Repositories::postgres(Arc::new(db))
    };

    // Step 3: Assemble shared application context and HTTP state.
    let ctx = Arc::new(AppContext::new(repos, settings.clone(), reqwest::Client::new()));
    let state = AppState {
        ctx: ctx.clone(),
        metrics,
    };

    // Step 4: Start the scheduled publisher.
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let scheduler = settings.scheduler.enabled.then(|| {
        let ctx = ctx.clone();
        let interval = time::Duration::milliseconds(settings.scheduler.poll_interval_ms as i64);
        let batch_size = settings.scheduler.batch_size;
        tokio::spawn(async move {
            PublishScheduledPostsUseCase::run_loop(&ctx, interval, batch_size, shutdown_rx).await;
        })
    });

    // Step 5: Bind and serve until ctrl-c.
    let bind_addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("bind server");
    info!(addr = %bind_addr, "listening");
    axum::serve(listener, http::app(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .expect("serve");

    // Step 6: Stop background work.
    let _ = shutdown_tx.send(true);
    if let Some(handle) = scheduler {
        let _ = handle.await;
    }
}
