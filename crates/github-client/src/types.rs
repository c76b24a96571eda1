use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered GitHub OAuth application credentials
#[derive(Debug, Clone)]
pub struct OAuthApp {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: Option<String>,
}

/// Token returned by the authorization-code exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub scope: String,
}

/// Raw body of `POST /login/oauth/access_token`
#[derive(Debug, Deserialize)]
pub(crate) struct AccessTokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// A GitHub account as returned by `/user` and `/users/{username}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub id: u64,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: String,
    pub bio: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    pub created_at: Option<DateTime<Utc>>,
}

/// Repository as returned by the repos endpoints
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GitHubRepo {
    pub name: String,
    pub full_name: String,
    pub owner: RepoOwner,
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    /// Only present on the single-repository endpoint
    pub subscribers_count: Option<u64>,
    #[serde(default)]
    pub open_issues_count: u64,
    pub language: Option<String>,
    #[serde(default)]
    pub fork: bool,
    pub pushed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RepoOwner {
    pub login: String,
}

/// Number of a user's repositories written primarily in one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageCount {
    pub language: String,
    pub repos: u32,
}

/// Aggregated contribution statistics for a GitHub user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: String,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub total_stars: u64,
    pub total_forks: u64,
    pub top_languages: Vec<LanguageCount>,
}

/// Statistics for a single repository
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoStats {
    pub owner: String,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub open_issues: u64,
    pub language: Option<String>,
    pub pushed_at: Option<DateTime<Utc>>,
}

impl From<GitHubRepo> for RepoStats {
    fn from(repo: GitHubRepo) -> Self {
        Self {
            owner: repo.owner.login,
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description,
            html_url: repo.html_url,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            watchers: repo.subscribers_count.unwrap_or(0),
            open_issues: repo.open_issues_count,
            language: repo.language,
            pushed_at: repo.pushed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_deserialization() {
        let json = r#"{
            "name": "devcred",
            "full_name": "octocat/devcred",
            "owner": { "login": "octocat", "id": 1 },
            "description": null,
            "html_url": "https://github.com/octocat/devcred",
            "stargazers_count": 42,
            "forks_count": 7,
            "subscribers_count": 3,
            "open_issues_count": 2,
            "language": "Rust",
            "fork": false,
            "pushed_at": "2024-05-01T12:00:00Z"
        }"#;

        let repo: GitHubRepo = serde_json::from_str(json).unwrap();
        let stats = RepoStats::from(repo);
        assert_eq!(stats.owner, "octocat");
        assert_eq!(stats.stars, 42);
        assert_eq!(stats.forks, 7);
        assert_eq!(stats.watchers, 3);
        assert_eq!(stats.language.as_deref(), Some("Rust"));
        assert!(stats.pushed_at.is_some());
    }

    #[test]
    fn test_user_stats_serializes_camel_case() {
        let stats = UserStats {
            login: "octocat".to_string(),
            name: None,
            avatar_url: None,
            html_url: "https://github.com/octocat".to_string(),
            public_repos: 8,
            followers: 100,
            following: 1,
            total_stars: 50,
            total_forks: 5,
            top_languages: vec![],
        };

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["publicRepos"], 8);
        assert_eq!(json["totalStars"], 50);
        assert!(json["topLanguages"].is_array());
    }

    #[test]
    fn test_token_error_response() {
        let json = r#"{
            "error": "bad_verification_code",
            "error_description": "The code passed is incorrect or expired."
        }"#;
        let response: AccessTokenResponse = serde_json::from_str(json).unwrap();
        assert!(response.access_token.is_none());
        assert_eq!(response.error.as_deref(), Some("bad_verification_code"));
    }
}
