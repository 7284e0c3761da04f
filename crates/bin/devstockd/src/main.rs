//! # devstockd — devstock daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (`devstock.toml`, env vars)
//! - Initialize logging
//! - Connect to `PostgreSQL` and Redis
//! - Construct application services, injecting adapters via port traits
//! - Reset the anagram counter, build the axum router, bind and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT) and close the pool
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

mod config;

use devstock_adapter_http_axum::state::AppState;
use devstock_adapter_storage_postgres_sqlx::PgInventoryStore;
use devstock_app::random::StdRandom;
use devstock_app::services::anagram_service::AnagramService;
use devstock_app::services::device_service::DeviceService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Stores
    let db = config.storage().build().await?;
    let counter = config.counter().build().await?;

    // Services
    let anagram_service = AnagramService::new(counter);
    anagram_service.reset_counter().await?;
    let device_service = DeviceService::new(
        PgInventoryStore::new(db.pool().clone()),
        StdRandom::from_entropy(),
    );

    // HTTP
    let state = AppState::new(anagram_service, device_service);
    let app = devstock_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "devstockd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("devstockd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
