//! DevCred API server
//!
//! Resolves and caches reputation NFT metadata, links GitHub accounts via
//! OAuth and serves GitHub contribution statistics.

mod config;
mod error;
mod reputation;
mod routes;
mod state;
mod svg;

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::config::Config;
use crate::error::ServerError;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    init_logging()?;

    let config = Config::from_env();
    info!(port = config.port, "Starting devcred-server");
    info!(gateway = %config.ipfs_gateway_url, "IPFS gateway");
    info!(
        capacity = config.metadata_cache_capacity,
        ttl_secs = config.metadata_cache_ttl_secs,
        "Metadata cache"
    );
    if config.oauth_app().is_none() {
        info!("GitHub OAuth disabled (GITHUB_CLIENT_ID / GITHUB_CLIENT_SECRET unset)");
    }

    let state = AppState::from_config(&config)?;
    let app = routes::create_router(state, &config.cors_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_logging() -> Result<(), ServerError> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("devcred_server=info".parse()?)
        .add_directive("nft_metadata_resolver=info".parse()?)
        .add_directive("github_client=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    Ok(())
}
