//! race-registration server entry point.
//!
//! Loads configuration, wires the store and mailer, and starts the Axum
//! HTTP server.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use race_registration::api;
use race_registration::app_state::AppState;
use race_registration::config::{AppConfig, LogFormat};
use race_registration::notify::Mailer;
use race_registration::persistence::{MemoryStore, PostgresStore, RegistrationStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Plain => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting race-registration");

    // Build persistence layer
    let store: Arc<dyn RegistrationStore> = if config.persistence_enabled {
        let store = PostgresStore::connect_lazy(&config).context("configuring database pool")?;
        if config.database_url.is_some() {
            if let Err(err) = store.migrate().await {
                tracing::error!(
                    error = %err,
                    "database migration failed; store requests will fail"
                );
            }
        }
        Arc::new(store)
    } else {
        tracing::warn!("PERSISTENCE_ENABLED=false; registrations are kept in memory only");
        Arc::new(MemoryStore::new())
    };

    // Build email layer
    let mailer = Mailer::from_config(&config);

    // Build application state and router
    let listen_addr = config.listen_addr;
    let app = api::build_app(AppState::new(config, store, mailer));

    // Start server
    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("binding {listen_addr}"))?;
    tracing::info!(addr = %listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
