//! # Agenda API Server
//!
//! ```bash
//! JWT_SECRET=... cargo run -p agenda-api
//! ```
//!
//! Without `DATABASE_URL` the server keeps everything in memory.

use std::sync::Arc;

use agenda_api::{
    app::{build_router, AppState},
    config::{Config, LogFormat},
};
use agenda_shared::db::{
    migrations::run_migrations,
    pool::{create_pool, DatabaseConfig},
};
use agenda_shared::store::{DocumentStore, MemoryStore, PgDocumentStore};
use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        policy = %config.access_policy,
        base_path = %config.api.base_path,
        "Agenda API starting"
    );

    let store = open_store(&config).await?;
    let addr = config.bind_address();
    let state = AppState::new(store, config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "agenda_api=debug,agenda_shared=debug,tower_http=info".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match &config.database {
        Some(db) => {
            let pool = create_pool(DatabaseConfig {
                max_connections: db.max_connections,
                ..DatabaseConfig::new(db.url.clone())
            })
            .await
            .context("failed to connect to PostgreSQL")?;
            run_migrations(&pool).await?;

            Ok(Arc::new(PgDocumentStore::new(pool)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using the in-memory store, data is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
