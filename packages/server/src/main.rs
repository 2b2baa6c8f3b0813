use std::sync::Arc;

use anyhow::Context;
use common::storage::filesystem::FilesystemBlobStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::config::AppConfig;
use server::database::init_db;
use server::seed::ensure_indexes;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = init_db(&config.database)
        .await
        .context("failed to initialize database")?;
    ensure_indexes(&db).await?;

    let blob_store = FilesystemBlobStore::new(
        config.storage.media_dir.clone(),
        config.storage.max_upload_size,
    )
    .await
    .context("failed to initialize media storage")?;

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState {
        db,
        blob_store: Arc::new(blob_store),
        config: Arc::new(config),
    };

    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
