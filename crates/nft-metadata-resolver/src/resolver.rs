//! Metadata fetching and caching

use crate::error::{ResolverError, Result};
use ipfs_uri::{ContentUri, Gateway};
use metadata_cache::{CacheStats, MetadataCache};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_CACHE_CAPACITY: usize = 500;
const DEFAULT_CACHE_TTL_SECS: u64 = 60 * 60; // 1 hour
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
const DEFAULT_USER_AGENT: &str = "devcred-metadata-resolver/0.1";

/// Settings for a [`MetadataResolver`]
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub gateway_url: String,
    pub cache_capacity: usize,
    pub cache_ttl: Duration,
    pub fetch_timeout: Duration,
    pub user_agent: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            gateway_url: ipfs_uri::DEFAULT_GATEWAY_URL.to_string(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Resolves token metadata URIs to JSON documents with a bounded cache
///
/// The cache is keyed by the URI exactly as supplied, so every token id that
/// points at the same URI shares one cached document. Concurrent misses for
/// the same URI are not coalesced; each fetches and the last insert wins.
pub struct MetadataResolver {
    client: Client,
    gateway: Gateway,
    cache: MetadataCache<String, Value>,
}

impl MetadataResolver {
    pub fn new(config: ResolverConfig) -> Result<Self> {
        let gateway = Gateway::new(&config.gateway_url)?;

        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| ResolverError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            gateway,
            cache: MetadataCache::new(config.cache_capacity, config.cache_ttl),
        })
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Resolve the metadata document behind `uri`
    ///
    /// `token_id` only labels log lines; it takes no part in caching.
    pub async fn resolve(&self, token_id: &str, uri: &str) -> Result<Value> {
        if uri.trim().is_empty() {
            return Err(ResolverError::MissingUri);
        }

        let key = uri.to_string();
        if let Some(document) = self.cache.get(&key).await {
            debug!(token_id, uri, "Metadata cache hit");
            return Ok(document);
        }

        let url = self.gateway.resolve(uri);
        debug!(token_id, uri, url = %url, "Metadata cache miss, fetching");

        let document = self.fetch(&url).await.map_err(|e| {
            warn!(token_id, uri, url = %url, error = %e, "Failed to resolve metadata");
            e
        })?;

        self.cache.insert(key, document.clone()).await;
        Ok(document)
    }

    /// Drop every cached document
    pub async fn invalidate_all(&self) {
        self.cache.clear().await;
        debug!("Metadata cache invalidated");
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    async fn fetch(&self, url: &str) -> Result<Value> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolverError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let mut document: Value = serde_json::from_slice(&body)?;
        self.rewrite_image(&mut document);

        Ok(document)
    }

    /// Point a content-addressed top-level `image` at the gateway
    fn rewrite_image(&self, document: &mut Value) {
        let Some(image) = document.get_mut("image") else {
            return;
        };

        let rewritten = image
            .as_str()
            .and_then(ContentUri::parse)
            .map(|content| self.gateway.http_url(&content));

        if let Some(url) = rewritten {
            *image = Value::String(url);
        }
    }
}
