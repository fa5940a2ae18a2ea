//! Learn Code Fast - API server entry point

use std::{net::SocketAddr, sync::Arc};

use redis::aio::ConnectionManager;
use tokio::net::TcpListener;

use learn_code_fast::{
    app::build_router,
    config::Config,
    db::{self, PgStore},
    llm::{AzureOpenAi, ChatCompletions},
    state::AppState,
    tasks::RedisTaskQueue,
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init_tracing(&config.server);

    tracing::info!(
        app = %config.server.app_name,
        environment = %config.server.environment,
        "Starting server..."
    );

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::connect_with_retry(&config.database).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    // Initialize task broker and result backend
    tracing::info!("Connecting to task broker...");
    let broker = ConnectionManager::new(redis::Client::open(config.redis.broker_url())?).await?;
    let backend =
        ConnectionManager::new(redis::Client::open(config.redis.result_backend_url())?).await?;
    let tasks = RedisTaskQueue::new(broker, backend, config.redis.queue.clone());

    let llm: Option<Arc<dyn ChatCompletions>> = match config.azure.credentials() {
        Some(credentials) => {
            let client = AzureOpenAi::new(credentials)?;
            tracing::info!(deployment = client.deployment(), "Chat completions enabled");
            Some(Arc::new(client) as Arc<dyn ChatCompletions>)
        }
        None => {
            tracing::warn!("Azure OpenAI credentials not set, using local fallbacks");
            None
        }
    };

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let state = AppState::new(
        Arc::new(PgStore::new(db_pool)),
        Arc::new(tasks),
        llm,
        config,
    );
    let app = build_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
