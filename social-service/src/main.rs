use social_service::{
    build_router,
    config::{SocialConfig, StorageBackend},
    services::{Database, MemoryStore, RelationStore, Store},
    AppState,
};
use service_core::error::AppError;
use service_core::observability::init_tracing;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load configuration - fail fast if invalid
    let config = SocialConfig::from_env()?;

    init_tracing(
        &config.service_name,
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    );

    social_service::services::metrics::init_metrics();

    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        environment = ?config.environment,
        storage = ?config.storage,
        "Starting social service"
    );

    let (store, relations): (Arc<dyn Store>, Arc<dyn RelationStore>) = match config.storage {
        StorageBackend::Postgres => {
            tracing::info!("Initializing database connection");
            let db = Database::connect(&config.database)
                .await
                .map_err(|e| AppError::DatabaseError(e.into()))?;
            db.run_migrations()
                .await
                .map_err(|e| AppError::DatabaseError(e.into()))?;
            tracing::info!("Database initialized successfully");

            let db = Arc::new(db);
            (db.clone() as Arc<dyn Store>, db as Arc<dyn RelationStore>)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            let memory = Arc::new(MemoryStore::new());
            (memory.clone() as Arc<dyn Store>, memory as Arc<dyn RelationStore>)
        }
    };

    let state = AppState::new(config.clone(), store, relations)?;
    let app = build_router(state)?;

    let addr = config.common.bind_addr();

    let service_span = tracing::info_span!(
        "service",
        service = %config.service_name,
        version = %config.service_version,
        environment = ?config.environment,
    );
    let _guard = service_span.enter();

    tracing::info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    service_core::axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Service shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
