//! # sdata-api — Binary Entry Point
//!
//! Starts the Axum HTTP server. Configuration comes from the environment
//! (`SDATA_PORT`, `SDATA_SCHEMA_DIR`); log filtering from `RUST_LOG`.

use sdata_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let port = config.port;
    let state = AppState::with_config(config);

    if let Some(dir) = state.config.schema_dir.clone() {
        let count = state.seed_schemas(&dir).map_err(|e| {
            tracing::error!("Schema seeding failed: {e}");
            e
        })?;
        tracing::info!(dir = %dir.display(), count, "seeded schemas");
    }

    let app = sdata_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("sdata API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
