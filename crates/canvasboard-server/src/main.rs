//! Canvas Board server entry point.

use canvasboard_server::config::ServerConfig;
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "canvasboard_server=info,tower_http=info".into()),
        )
        .init();

    let config = ServerConfig::parse();
    let storage = config.storage()?;
    info!("Storing canvases in {}", config.storage_location());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("Canvas Board server listening on {}", config.addr);

    canvasboard_server::serve(listener, storage).await?;
    Ok(())
}
