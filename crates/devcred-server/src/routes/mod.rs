pub mod github;
pub mod health;
pub mod metadata;
pub mod nft;
pub mod oauth;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Create the HTTP router
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        // Health
        .route("/health", get(health::health))
        // NFT metadata resolution
        .route("/metadata/clear-cache", post(metadata::clear_cache))
        .route("/metadata/{token_id}", get(metadata::get_metadata))
        // GitHub OAuth
        .route("/auth/github/login", get(oauth::login))
        .route("/auth/github/callback", get(oauth::callback))
        // GitHub stats
        .route(
            "/api/github/users/{username}/stats",
            get(github::user_stats),
        )
        .route("/api/github/repos/{owner}/{repo}", get(github::repo_stats))
        // Reputation NFTs
        .route("/api/nft/{owner}/{repo}/metadata.json", get(nft::metadata))
        .route("/api/nft/{owner}/{repo}/image.svg", get(nft::image))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(cors_origins: &[String]) -> CorsLayer {
    if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true)
    }
}
