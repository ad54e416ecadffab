use std::sync::Arc;

use anyhow::Context;
use tinylink::{
    config::{AppConfig, StorageBackend},
    store::{LinkStore, MemoryStore, SqliteStore},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (ignore error if file is absent; env vars may already be set)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tinylink=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!("Starting tinylink on {}:{}", config.host, config.port);
    tracing::info!("Base URL: {}", config.base_url);

    let store: Arc<dyn LinkStore> = match config.storage {
        StorageBackend::Sqlite => {
            let store = SqliteStore::connect(&config.database_url)
                .await
                .with_context(|| format!("failed to open database {}", config.database_url))?;
            store
                .migrate()
                .await
                .context("failed to create the urls table")?;
            tracing::info!("Database ready at {}", config.database_url);
            Arc::new(store)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; links will be lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let bind_addr = format!("{}:{}", config.host, config.port);
    let app = tinylink::router(Arc::new(AppState::new(store, config)));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
