//! tai-ta - Terrain Analysis Microservice
//!
//! **Module Identity:**
//! - Name: tai-ta (Terrain Analysis)
//! - Port: 8000 (configurable)
//!
//! Serves the TerrainAI frontend: image uploads are classified against a
//! vision model and resolved to a terrain category; coordinate lookups
//! are delegated to the remote geology service.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tai_ta::config::ServiceConfig;
use tai_ta::{build_router, AppState};

/// Command-line arguments for tai-ta
#[derive(Parser, Debug)]
#[command(name = "tai-ta")]
#[command(about = "Terrain Analysis microservice for TerrainAI")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "TAI_TA_PORT")]
    port: Option<u16>,

    /// Path to the TOML configuration file
    #[arg(short, long, env = "TAI_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tai_ta=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command-line arguments
    let args = Args::parse();

    // Resolve configuration (CLI -> env -> config dir -> defaults)
    let mut config = ServiceConfig::resolve(args.config.as_deref())
        .context("Failed to resolve configuration")?;
    if let Some(port) = args.port {
        config.service.port = port;
    }

    info!("Starting tai-ta (Terrain Analysis) microservice");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Geology service: {}", config.geology.base_url);
    info!("Classifier endpoint: {}", config.classifier.endpoint);
    info!(
        "Synthetic fallback: {}",
        config.fallback.synthetic_on_classifier_failure
    );

    let host = config.service.host.clone();
    let port = config.service.port;

    // Create application state (HTTP clients, resolution engine)
    let state = AppState::new(config).context("Failed to initialize application state")?;

    // Build router
    let app = build_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", host, port))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
