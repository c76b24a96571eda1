use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use github_client::GitHubError;
use nft_metadata_resolver::ResolverError;
use serde_json::json;

/// Application error type that converts to HTTP responses
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    BadGateway(String),
    NotConfigured(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::NotConfigured(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

impl From<GitHubError> for AppError {
    fn from(e: GitHubError) -> Self {
        match e {
            GitHubError::NotFound(what) => AppError::NotFound(format!("{what} not found")),
            GitHubError::OAuth(msg) => AppError::Unauthorized(msg),
            GitHubError::Config(msg) => AppError::Internal(msg),
            e => {
                tracing::warn!(error = %e, "GitHub request failed");
                AppError::BadGateway("GitHub request failed".into())
            }
        }
    }
}

/// Errors that stop the server from starting
#[derive(Debug)]
pub enum ServerError {
    Config(String),
    Resolver(ResolverError),
    GitHub(GitHubError),
    Io(std::io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ServerError::Resolver(err) => write!(f, "Metadata resolver error: {}", err),
            ServerError::GitHub(err) => write!(f, "GitHub client error: {}", err),
            ServerError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::Resolver(err) => Some(err),
            ServerError::GitHub(err) => Some(err),
            ServerError::Io(err) => Some(err),
            ServerError::Config(_) => None,
        }
    }
}

impl From<ResolverError> for ServerError {
    fn from(err: ResolverError) -> Self {
        ServerError::Resolver(err)
    }
}

impl From<GitHubError> for ServerError {
    fn from(err: GitHubError) -> Self {
        ServerError::GitHub(err)
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Io(err)
    }
}

impl From<tracing_subscriber::filter::ParseError> for ServerError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        ServerError::Config(err.to_string())
    }
}
