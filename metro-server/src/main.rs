use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use metro_server::config::{ConfigError, ServerConfig};
use metro_server::fare::{FareError, FareTable};
use metro_server::network::{Network, NetworkError, NetworkSeed, SeedError};
use metro_server::web::{AppState, create_router};

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "metro_server=info,tower_http=info";

/// Errors that stop the server from starting.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error("failed to load network: {0}")]
    Network(#[from] NetworkError),

    #[error("failed to read fare table {path}: {source}")]
    FareFile {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Fare(#[from] FareError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "metro server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;

    let fares = match &config.fare_table_path {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|source| StartupError::FareFile {
                path: path.display().to_string(),
                source,
            })?;
            let table = FareTable::from_json(&json)?;
            info!(path = %path.display(), tiers = table.tiers().len(), "loaded fare table");
            table
        }
        None => FareTable::default(),
    };

    // Rebuild the graph from the full persisted set before serving
    let network = match &config.seed_path {
        Some(path) => {
            info!(path = %path.display(), "loading network seed");
            Network::from_seed(NetworkSeed::load(path)?)?
        }
        None => Network::new(),
    };

    let app = create_router(AppState::new(network, fares));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "metro server listening");
    info!("API Endpoints:");
    info!("  GET    /health");
    info!("  GET    /stations, POST /stations, DELETE /stations/:id");
    info!("  GET    /lines, POST /lines, GET|DELETE /lines/:id");
    info!("  POST   /lines/:id/sections, DELETE /sections/:id");
    info!("  GET    /paths?source=&target=");
    info!("  GET    /fares?distance=");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("metro server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
