//! Error types for content URI handling

use std::fmt;

#[derive(Debug)]
pub enum UriError {
    InvalidGateway(String),
}

impl fmt::Display for UriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UriError::InvalidGateway(msg) => write!(f, "Invalid gateway URL: {}", msg),
        }
    }
}

impl std::error::Error for UriError {}

pub type Result<T> = std::result::Result<T, UriError>;
