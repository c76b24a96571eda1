use std::env;
use std::time::Duration;

use github_client::OAuthApp;
use nft_metadata_resolver::ResolverConfig;

/// Application configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub public_url: String,
    pub ipfs_gateway_url: String,
    pub metadata_cache_capacity: usize,
    pub metadata_cache_ttl_secs: u64,
    pub metadata_fetch_timeout_secs: u64,
    pub github_client_id: Option<String>,
    pub github_client_secret: Option<String>,
    pub github_redirect_uri: Option<String>,
    pub github_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
            public_url: "http://localhost:3000".to_string(),
            ipfs_gateway_url: "https://ipfs.io".to_string(),
            metadata_cache_capacity: 500,
            metadata_cache_ttl_secs: 60 * 60, // 1 hour
            metadata_fetch_timeout_secs: 10,
            github_client_id: None,
            github_client_secret: None,
            github_redirect_uri: None,
            github_token: None,
        }
    }
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|s| s.split(',').map(|o| o.trim().to_string()).collect())
            .unwrap_or(defaults.cors_origins);

        let public_url = env::var("PUBLIC_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| format!("http://localhost:{port}"));

        let ipfs_gateway_url =
            env::var("IPFS_GATEWAY_URL").unwrap_or(defaults.ipfs_gateway_url);

        let metadata_cache_capacity = env::var("METADATA_CACHE_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.metadata_cache_capacity);

        let metadata_cache_ttl_secs = env::var("METADATA_CACHE_TTL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.metadata_cache_ttl_secs);

        let metadata_fetch_timeout_secs = env::var("METADATA_FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.metadata_fetch_timeout_secs);

        Self {
            port,
            cors_origins,
            public_url,
            ipfs_gateway_url,
            metadata_cache_capacity,
            metadata_cache_ttl_secs,
            metadata_fetch_timeout_secs,
            github_client_id: non_empty_var("GITHUB_CLIENT_ID"),
            github_client_secret: non_empty_var("GITHUB_CLIENT_SECRET"),
            github_redirect_uri: non_empty_var("GITHUB_REDIRECT_URI"),
            github_token: non_empty_var("GITHUB_TOKEN"),
        }
    }

    /// OAuth credentials, when both client id and secret are set
    pub fn oauth_app(&self) -> Option<OAuthApp> {
        Some(OAuthApp {
            client_id: self.github_client_id.clone()?,
            client_secret: self.github_client_secret.clone()?,
            redirect_uri: self.github_redirect_uri.clone(),
        })
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            gateway_url: self.ipfs_gateway_url.clone(),
            cache_capacity: self.metadata_cache_capacity,
            cache_ttl: Duration::from_secs(self.metadata_cache_ttl_secs),
            fetch_timeout: Duration::from_secs(self.metadata_fetch_timeout_secs),
            ..Default::default()
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
