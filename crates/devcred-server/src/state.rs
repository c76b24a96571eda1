use std::sync::Arc;

use chrono::{DateTime, Utc};
use github_client::{GitHubClient, OAuthApp};
use nft_metadata_resolver::MetadataResolver;

use crate::config::Config;
use crate::error::ServerError;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<MetadataResolver>,
    pub github: Arc<GitHubClient>,
    /// None when GitHub sign-in is not configured
    pub oauth_app: Option<Arc<OAuthApp>>,
    pub public_url: String,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, ServerError> {
        let resolver = MetadataResolver::new(config.resolver_config())?;
        let github = GitHubClient::new()?.with_token(config.github_token.clone());

        Ok(Self {
            resolver: Arc::new(resolver),
            github: Arc::new(github),
            oauth_app: config.oauth_app().map(Arc::new),
            public_url: config.public_url.clone(),
            started_at: Utc::now(),
        })
    }
}
