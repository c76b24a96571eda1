//! Content-addressed storage URIs
//!
//! Parses `ipfs://<cid>` and `ipns://<name>` URIs and rewrites them to
//! fetchable HTTP gateway URLs of the form `<gateway>/<scheme>/<path>`.

mod error;

pub use error::{Result, UriError};

use std::fmt;
use url::Url;

pub const DEFAULT_GATEWAY_URL: &str = "https://ipfs.io";

/// Content-addressed URI scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Ipfs,
    Ipns,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Ipfs => "ipfs",
            Scheme::Ipns => "ipns",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed components of a content-addressed URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentUri {
    pub scheme: Scheme,
    /// Content hash or name, optionally followed by a sub-path
    pub path: String,
}

impl ContentUri {
    /// Parse a URI like "ipfs://bafy.../metadata.json"
    pub fn parse(uri: &str) -> Option<Self> {
        let (scheme, rest) = uri.split_once("://")?;
        let scheme = if scheme.eq_ignore_ascii_case("ipfs") {
            Scheme::Ipfs
        } else if scheme.eq_ignore_ascii_case("ipns") {
            Scheme::Ipns
        } else {
            return None;
        };

        // Some minters emit "ipfs://ipfs/<cid>"
        let redundant = format!("{}/", scheme.as_str());
        let path = rest.strip_prefix(redundant.as_str()).unwrap_or(rest);

        if path.is_empty() {
            return None;
        }

        Some(Self {
            scheme,
            path: path.to_string(),
        })
    }

    /// Check whether a URI uses a content-addressed scheme
    pub fn is_content_uri(uri: &str) -> bool {
        Self::parse(uri).is_some()
    }
}

/// HTTP gateway used to fetch content-addressed documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gateway {
    base_url: String,
}

impl Gateway {
    /// Create a gateway from an http(s) base URL such as "https://ipfs.io"
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed =
            Url::parse(base_url).map_err(|e| UriError::InvalidGateway(format!("{base_url}: {e}")))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(UriError::InvalidGateway(format!(
                "{base_url}: scheme must be http or https"
            )));
        }
        if parsed.host_str().is_none() {
            return Err(UriError::InvalidGateway(format!("{base_url}: missing host")));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Gateway URL for a parsed content URI
    pub fn http_url(&self, uri: &ContentUri) -> String {
        format!("{}/{}/{}", self.base_url, uri.scheme, uri.path)
    }

    /// Gateway URL for content URIs, the input unchanged for anything else
    pub fn resolve(&self, uri: &str) -> String {
        match ContentUri::parse(uri) {
            Some(content) => self.http_url(&content),
            None => uri.to_string(),
        }
    }
}

impl Default for Gateway {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GATEWAY_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ipfs_uri() {
        let uri = ContentUri::parse("ipfs://abc123").unwrap();
        assert_eq!(uri.scheme, Scheme::Ipfs);
        assert_eq!(uri.path, "abc123");
    }

    #[test]
    fn test_parse_ipns_uri_with_subpath() {
        let uri = ContentUri::parse("ipns://k51qzi5uqu5d/meta/1.json").unwrap();
        assert_eq!(uri.scheme, Scheme::Ipns);
        assert_eq!(uri.path, "k51qzi5uqu5d/meta/1.json");
    }

    #[test]
    fn test_parse_scheme_case_insensitive() {
        let uri = ContentUri::parse("IPFS://abc123").unwrap();
        assert_eq!(uri.scheme, Scheme::Ipfs);
    }

    #[test]
    fn test_parse_strips_redundant_segment() {
        let uri = ContentUri::parse("ipfs://ipfs/bafyabc").unwrap();
        assert_eq!(uri.path, "bafyabc");
    }

    #[test]
    fn test_parse_empty_path() {
        assert!(ContentUri::parse("ipfs://").is_none());
        assert!(ContentUri::parse("ipfs://ipfs/").is_none());
    }

    #[test]
    fn test_parse_other_schemes() {
        assert!(ContentUri::parse("https://example.com/1.json").is_none());
        assert!(ContentUri::parse("ar://abc").is_none());
        assert!(ContentUri::parse("abc123").is_none());
        assert!(ContentUri::parse("").is_none());
    }

    #[test]
    fn test_default_gateway_rewrite() {
        let gateway = Gateway::default();
        assert_eq!(gateway.resolve("ipfs://abc123"), "https://ipfs.io/ipfs/abc123");
        assert_eq!(gateway.resolve("ipns://name"), "https://ipfs.io/ipns/name");
    }

    #[test]
    fn test_resolve_passes_http_through() {
        let gateway = Gateway::default();
        let uri = "https://api.example.com/token/7";
        assert_eq!(gateway.resolve(uri), uri);
    }

    #[test]
    fn test_custom_gateway_trailing_slash() {
        let gateway = Gateway::new("https://gateway.pinata.cloud/").unwrap();
        assert_eq!(gateway.base_url(), "https://gateway.pinata.cloud");
        assert_eq!(
            gateway.resolve("ipfs://Qm123/0.json"),
            "https://gateway.pinata.cloud/ipfs/Qm123/0.json"
        );
    }

    #[test]
    fn test_gateway_rejects_invalid_urls() {
        assert!(Gateway::new("not a url").is_err());
        assert!(Gateway::new("ftp://ipfs.io").is_err());
    }

    #[test]
    fn test_is_content_uri() {
        assert!(ContentUri::is_content_uri("ipfs://abc"));
        assert!(!ContentUri::is_content_uri("http://abc"));
    }
}
