//! Bixso Orchestrator server binary.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;

use bixso_orchestrator::adapters::http::app_router;
use bixso_orchestrator::adapters::memory::{InMemoryDocumentStore, SeedError};
use bixso_orchestrator::adapters::{FirestoreConfig, FirestoreStore};
use bixso_orchestrator::config::{AppConfig, ConfigError, StoreBackend, StoreConfig};
use bixso_orchestrator::logging::init_tracing;
use bixso_orchestrator::ports::{DocumentStore, StoreError};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Document store setup failed: {0}")]
    Store(#[from] StoreError),

    #[error("Seed loading failed: {0}")]
    Seed(#[from] SeedError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let dotenv_present = Path::new(".env").exists();

    let config = AppConfig::load()?;
    init_tracing(&config.server.log_level, config.is_production());

    if !dotenv_present {
        tracing::warn!(".env file is missing; relying on process environment");
    }

    config.validate().map_err(ConfigError::from)?;
    let addr = config.server.socket_addr().map_err(ConfigError::from)?;

    let store = build_store(&config.store).await?;
    tracing::info!(backend = store.backend_name(), "Document store ready");

    let app = app_router(
        store,
        config.server.request_timeout(),
        &config.server.cors_origins_list(),
    );

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Bixso Orchestrator listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn build_store(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, StartupError> {
    match config.backend {
        StoreBackend::Firestore => {
            let mut firestore = FirestoreConfig::new(&config.base_url, &config.database_id)
                .with_timeout(config.timeout());
            if let Some(project_id) = &config.project_id {
                firestore = firestore.with_project_id(project_id);
            }

            let store = FirestoreStore::connect(
                firestore,
                &config.credentials_path,
                config.emulator_host.as_deref(),
            )
            .await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            let store = match &config.seed_path {
                Some(path) => {
                    tracing::info!(path = %path.display(), "Seeding in-memory store");
                    InMemoryDocumentStore::from_seed_file(path).await?
                }
                None => {
                    tracing::warn!("In-memory store started without seed data");
                    InMemoryDocumentStore::new()
                }
            };
            Ok(Arc::new(store))
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Ctrl+C received, shutting down");
}
