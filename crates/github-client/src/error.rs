use std::fmt;

/// Errors from the GitHub client
#[derive(Debug)]
pub enum GitHubError {
    Http(reqwest::Error),
    /// Non-2xx response other than 404
    Api { status: u16, message: String },
    NotFound(String),
    /// GitHub rejected the authorization code
    OAuth(String),
    Config(String),
}

impl fmt::Display for GitHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::Api { status, message } => write!(f, "GitHub API error ({status}): {message}"),
            Self::NotFound(what) => write!(f, "Not found on GitHub: {what}"),
            Self::OAuth(msg) => write!(f, "OAuth error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for GitHubError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GitHubError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

pub type Result<T> = std::result::Result<T, GitHubError>;
