use actix_web::{web, App, HttpServer};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod domain;
mod http;
mod metrics;
mod store;
mod utils;

use config::{Config, StoreBackend};
use domain::order::OrderCommandHandler;
use store::{KeyValueStore, MemoryStore, OrderRepository, RedisStore};
use utils::{connect_with_backoff, BackoffPolicy};

async fn connect_backend(config: &Config) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    match config.store {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; orders are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Redis => {
            let policy = BackoffPolicy {
                attempts: config.connect_attempts,
                ..BackoffPolicy::default()
            };
            let addr = config.redis_addr.as_str();

            let redis = connect_with_backoff(&policy, addr, |attempt| async move {
                tracing::info!(attempt, redis_addr = %addr, "Connecting to Redis...");
                let redis = RedisStore::connect(addr).await?;
                redis.ping().await?;
                Ok(redis)
            })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to connect to Redis at {}: {}", addr, e))?;

            Ok(Arc::new(redis))
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Structured logging; RUST_LOG wins over --log-level
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    config.validate()?;

    tracing::info!("🚀 Starting order service");

    // === 1. Storage backend ===
    let backend = connect_backend(&config).await?;
    let repository = Arc::new(OrderRepository::new(backend, config.store_timeout()));
    tracing::info!(backend = ?config.store, "✅ Store ready");

    // === 2. Lifecycle + metrics, shared by every worker ===
    let handler = web::Data::new(OrderCommandHandler::new(repository, config.page_size));
    let metrics = web::Data::new(metrics::Metrics::new()?);

    // === 3. HTTP server ===
    tracing::info!(port = config.server_port, "Starting the server...");

    HttpServer::new(move || {
        App::new()
            .app_data(handler.clone())
            .app_data(metrics.clone())
            .configure(http::configure)
            .configure(metrics::configure)
    })
    .shutdown_timeout(config.shutdown_timeout_secs)
    .bind(("0.0.0.0", config.server_port))?
    .run()
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}
