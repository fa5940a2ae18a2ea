//! Learn Code Fast - background task worker

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use redis::aio::ConnectionManager;

use learn_code_fast::{config::Config, tasks::Worker, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init_tracing(&config.server);

    tracing::info!(queue = %config.redis.queue, "Starting worker...");

    let broker = ConnectionManager::new(redis::Client::open(config.redis.broker_url())?).await?;
    let backend =
        ConnectionManager::new(redis::Client::open(config.redis.result_backend_url())?).await?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received shutdown signal, finishing current task...");
            shutdown_clone.store(true, Ordering::SeqCst);
        }
    });

    let mut worker = Worker::new(broker, backend, config.redis.queue.clone(), shutdown);
    worker.run().await
}
