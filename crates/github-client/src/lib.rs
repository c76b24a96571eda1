//! GitHub Client
//!
//! OAuth authorization-code exchange plus user and repository statistics
//! from the GitHub REST API. Statistics lookups are cached using moka async
//! caches.

mod client;
mod error;
mod types;

pub use client::GitHubClient;
pub use error::{GitHubError, Result};
pub use types::{AccessToken, GitHubUser, LanguageCount, OAuthApp, RepoStats, UserStats};
