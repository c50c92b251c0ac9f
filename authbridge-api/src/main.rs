//! # AuthBridge API Server
//!
//! This is the main API server for AuthBridge, providing registration, login,
//! and authenticated profile endpoints.
//!
//! ## Architecture
//!
//! The API server is built with Axum and provides:
//! - Identity endpoints (register, login)
//! - Bearer-token session verification
//! - Profile endpoints backed by a document store, joined with the
//!   credential store by user id
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p authbridge-api
//! ```

use authbridge_api::{app, config::Config};
use authbridge_shared::{
    db::{migrations, pool},
    docstore::DocStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "authbridge_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "AuthBridge API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let bind_address = config.bind_address();

    migrations::ensure_database_exists(&config.database.connection_url()).await?;
    let db = pool::create_pool(config.database.clone()).await?;
    migrations::run_migrations(&db).await?;

    let docs = DocStore::new(config.docstore.clone()).await?;

    let state = app::AppState::new(db.clone(), docs, config);
    let router = app::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool::close_pool(db).await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves when the process receives Ctrl+C
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received, draining connections"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
