//! Error types for the metadata resolver

use std::fmt;

#[derive(Debug)]
pub enum ResolverError {
    /// No metadata URI was supplied
    MissingUri,
    Http(Box<reqwest::Error>),
    /// Upstream answered with a non-2xx status
    Status(u16),
    InvalidJson(serde_json::Error),
    Config(String),
}

impl fmt::Display for ResolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverError::MissingUri => write!(f, "Missing metadata URI"),
            ResolverError::Http(err) => write!(f, "HTTP error: {}", err),
            ResolverError::Status(status) => write!(f, "Upstream returned status {}", status),
            ResolverError::InvalidJson(err) => write!(f, "Invalid metadata JSON: {}", err),
            ResolverError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ResolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolverError::Http(err) => Some(err.as_ref()),
            ResolverError::InvalidJson(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ResolverError {
    fn from(err: reqwest::Error) -> Self {
        ResolverError::Http(Box::new(err))
    }
}

impl From<serde_json::Error> for ResolverError {
    fn from(err: serde_json::Error) -> Self {
        ResolverError::InvalidJson(err)
    }
}

impl From<ipfs_uri::UriError> for ResolverError {
    fn from(err: ipfs_uri::UriError) -> Self {
        ResolverError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ResolverError>;
