use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

use crate::error::{GitHubError, Result};
use crate::types::{
    AccessToken, AccessTokenResponse, GitHubRepo, GitHubUser, LanguageCount, OAuthApp, RepoStats,
    UserStats,
};

const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_OAUTH_URL: &str = "https://github.com";
const DEFAULT_USER_AGENT: &str = "devcred-github-client/0.1";
const GITHUB_JSON: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";
const OAUTH_SCOPE: &str = "read:user";
const CACHE_TTL_SECS: u64 = 600; // 10 minutes
const TOP_LANGUAGES: usize = 5;

/// GitHub REST + OAuth client with cached statistics lookups
pub struct GitHubClient {
    http: Client,
    api_url: String,
    oauth_url: String,
    /// Server-side token for higher rate limits on public lookups
    token: Option<String>,
    user_cache: Cache<String, Arc<UserStats>>,
    repo_cache: Cache<String, Arc<RepoStats>>,
}

impl GitHubClient {
    /// Create a client against github.com
    pub fn new() -> Result<Self> {
        Self::with_base_urls(DEFAULT_API_URL, DEFAULT_OAUTH_URL)
    }

    /// Create a client against custom API and OAuth hosts (GitHub Enterprise)
    pub fn with_base_urls(api_url: &str, oauth_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| GitHubError::Config(format!("Failed to create HTTP client: {e}")))?;

        let user_cache = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(Duration::from_secs(CACHE_TTL_SECS))
            .build();

        let repo_cache = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(Duration::from_secs(CACHE_TTL_SECS))
            .build();

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            oauth_url: oauth_url.trim_end_matches('/').to_string(),
            token: None,
            user_cache,
            repo_cache,
        })
    }

    /// Authenticate public lookups with a server-side token
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    /// URL the browser is sent to for GitHub sign-in
    pub fn authorize_url(&self, app: &OAuthApp, state: Option<&str>) -> String {
        let mut url = format!(
            "{}/login/oauth/authorize?client_id={}&scope={}",
            self.oauth_url,
            urlencoding::encode(&app.client_id),
            urlencoding::encode(OAUTH_SCOPE)
        );
        if let Some(ref redirect_uri) = app.redirect_uri {
            url.push_str(&format!("&redirect_uri={}", urlencoding::encode(redirect_uri)));
        }
        if let Some(state) = state {
            url.push_str(&format!("&state={}", urlencoding::encode(state)));
        }
        url
    }

    /// Exchange an authorization code for an access token
    pub async fn exchange_code(&self, app: &OAuthApp, code: &str) -> Result<AccessToken> {
        let url = format!("{}/login/oauth/access_token", self.oauth_url);

        let mut body = json!({
            "client_id": app.client_id,
            "client_secret": app.client_secret,
            "code": code,
        });
        if let Some(ref redirect_uri) = app.redirect_uri {
            body["redirect_uri"] = json!(redirect_uri);
        }

        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GitHubError::Api {
                status: response.status().as_u16(),
                message: "token exchange failed".to_string(),
            });
        }

        let data: AccessTokenResponse = response.json().await?;

        if let Some(error) = data.error {
            warn!(error = %error, "GitHub rejected authorization code");
            return Err(GitHubError::OAuth(data.error_description.unwrap_or(error)));
        }

        let access_token = data
            .access_token
            .ok_or_else(|| GitHubError::OAuth("Response carried no access token".to_string()))?;

        Ok(AccessToken {
            access_token,
            token_type: data.token_type.unwrap_or_else(|| "bearer".to_string()),
            scope: data.scope.unwrap_or_default(),
        })
    }

    /// Fetch the account that owns an OAuth access token
    pub async fn authenticated_user(&self, access_token: &str) -> Result<GitHubUser> {
        let url = format!("{}/user", self.api_url);
        self.get_json(&url, Some(access_token), "authenticated user")
            .await
    }

    /// Contribution statistics for a user
    pub async fn user_stats(&self, username: &str) -> Result<Arc<UserStats>> {
        let cache_key = username.to_lowercase();
        if let Some(cached) = self.user_cache.get(&cache_key).await {
            return Ok(cached);
        }

        let user_url = format!("{}/users/{}", self.api_url, urlencoding::encode(username));
        let repos_url = format!("{user_url}/repos?per_page=100&sort=pushed");
        let resource = format!("user {username}");

        let (user, repos) = futures::try_join!(
            self.get_json::<GitHubUser>(&user_url, None, &resource),
            self.get_json::<Vec<GitHubRepo>>(&repos_url, None, &resource),
        )?;

        let stats = Arc::new(summarize_user(user, &repos));
        debug!(
            login = %stats.login,
            repos = repos.len(),
            total_stars = stats.total_stars,
            "Fetched GitHub user stats"
        );

        self.user_cache.insert(cache_key, stats.clone()).await;
        Ok(stats)
    }

    /// Statistics for a single repository
    pub async fn repo_stats(&self, owner: &str, repo: &str) -> Result<Arc<RepoStats>> {
        let cache_key = format!("{}/{}", owner.to_lowercase(), repo.to_lowercase());
        if let Some(cached) = self.repo_cache.get(&cache_key).await {
            return Ok(cached);
        }

        let url = format!(
            "{}/repos/{}/{}",
            self.api_url,
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        );
        let data: GitHubRepo = self
            .get_json(&url, None, &format!("repository {owner}/{repo}"))
            .await?;

        let stats = Arc::new(RepoStats::from(data));
        self.repo_cache.insert(cache_key, stats.clone()).await;
        Ok(stats)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        access_token: Option<&str>,
        resource: &str,
    ) -> Result<T> {
        let mut request = self
            .http
            .get(url)
            .header(ACCEPT, GITHUB_JSON)
            .header("X-GitHub-Api-Version", API_VERSION);

        if let Some(token) = access_token.or(self.token.as_deref()) {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        match response.status() {
            status if status.is_success() => Ok(response.json::<T>().await?),
            StatusCode::NOT_FOUND => Err(GitHubError::NotFound(resource.to_string())),
            status => {
                let message = response.text().await.unwrap_or_default();
                warn!(url, status = %status, "GitHub API request failed");
                Err(GitHubError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

/// Aggregate a user's own (non-fork) repositories into contribution stats
fn summarize_user(user: GitHubUser, repos: &[GitHubRepo]) -> UserStats {
    let own: Vec<&GitHubRepo> = repos.iter().filter(|r| !r.fork).collect();

    let total_stars = own.iter().map(|r| r.stargazers_count).sum();
    let total_forks = own.iter().map(|r| r.forks_count).sum();

    let mut by_language: HashMap<&str, u32> = HashMap::new();
    for repo in &own {
        if let Some(ref language) = repo.language {
            *by_language.entry(language.as_str()).or_default() += 1;
        }
    }

    let mut top_languages: Vec<LanguageCount> = by_language
        .into_iter()
        .map(|(language, repos)| LanguageCount {
            language: language.to_string(),
            repos,
        })
        .collect();
    top_languages.sort_by(|a, b| b.repos.cmp(&a.repos).then_with(|| a.language.cmp(&b.language)));
    top_languages.truncate(TOP_LANGUAGES);

    UserStats {
        login: user.login,
        name: user.name,
        avatar_url: user.avatar_url,
        html_url: user.html_url,
        public_repos: user.public_repos,
        followers: user.followers,
        following: user.following,
        total_stars,
        total_forks,
        top_languages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, State};
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type Hits = Arc<AtomicUsize>;

    fn repo_json(name: &str, stars: u64, forks: u64, language: Option<&str>, fork: bool) -> Value {
        json!({
            "name": name,
            "full_name": format!("octocat/{name}"),
            "owner": { "login": "octocat" },
            "description": null,
            "html_url": format!("https://github.com/octocat/{name}"),
            "stargazers_count": stars,
            "forks_count": forks,
            "open_issues_count": 0,
            "language": language,
            "fork": fork,
            "pushed_at": "2024-05-01T12:00:00Z"
        })
    }

    fn user_json(login: &str) -> Value {
        json!({
            "login": login,
            "id": 583231,
            "name": "The Octocat",
            "avatar_url": "https://avatars.githubusercontent.com/u/583231",
            "html_url": format!("https://github.com/{login}"),
            "bio": null,
            "public_repos": 4,
            "followers": 9000,
            "following": 9,
            "created_at": "2011-01-25T18:44:36Z"
        })
    }

    async fn access_token(Json(body): Json<Value>) -> Json<Value> {
        if body["code"] == "good-code" && body["client_secret"] == "secret" {
            Json(json!({
                "access_token": "gho_abc",
                "token_type": "bearer",
                "scope": "read:user"
            }))
        } else {
            Json(json!({
                "error": "bad_verification_code",
                "error_description": "The code passed is incorrect or expired."
            }))
        }
    }

    async fn current_user(headers: HeaderMap) -> std::result::Result<Json<Value>, AxumStatus> {
        match headers.get("authorization").and_then(|v| v.to_str().ok()) {
            Some("Bearer gho_abc") => Ok(Json(user_json("octocat"))),
            _ => Err(AxumStatus::UNAUTHORIZED),
        }
    }

    async fn user(
        State(hits): State<Hits>,
        Path(login): Path<String>,
    ) -> std::result::Result<Json<Value>, AxumStatus> {
        hits.fetch_add(1, Ordering::SeqCst);
        if login == "ghost" {
            return Err(AxumStatus::NOT_FOUND);
        }
        Ok(Json(user_json(&login)))
    }

    async fn user_repos(
        State(hits): State<Hits>,
        Path(login): Path<String>,
    ) -> std::result::Result<Json<Value>, AxumStatus> {
        hits.fetch_add(1, Ordering::SeqCst);
        if login == "ghost" {
            return Err(AxumStatus::NOT_FOUND);
        }
        Ok(Json(json!([
            repo_json("a", 10, 1, Some("Rust"), false),
            repo_json("b", 5, 2, Some("Rust"), false),
            repo_json("c", 3, 0, Some("TypeScript"), false),
            repo_json("d", 1000, 500, Some("Go"), true),
            repo_json("e", 0, 0, None, false),
        ])))
    }

    async fn repo(
        State(hits): State<Hits>,
        Path((owner, name)): Path<(String, String)>,
    ) -> std::result::Result<Json<Value>, AxumStatus> {
        hits.fetch_add(1, Ordering::SeqCst);
        match (owner.as_str(), name.as_str()) {
            ("octocat", "devcred") => {
                let mut body = repo_json("devcred", 42, 7, Some("Rust"), false);
                body["subscribers_count"] = json!(3);
                Ok(Json(body))
            }
            ("octocat", "limited") => Err(AxumStatus::FORBIDDEN),
            _ => Err(AxumStatus::NOT_FOUND),
        }
    }

    async fn spawn_github() -> (GitHubClient, Hits) {
        let hits: Hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/login/oauth/access_token", post(access_token))
            .route("/user", get(current_user))
            .route("/users/{login}", get(user))
            .route("/users/{login}/repos", get(user_repos))
            .route("/repos/{owner}/{name}", get(repo))
            .with_state(hits.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let base = format!("http://{addr}");
        (GitHubClient::with_base_urls(&base, &base).unwrap(), hits)
    }

    fn app() -> OAuthApp {
        OAuthApp {
            client_id: "Iv1.abc".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: Some("http://localhost:3000/auth/github/callback".to_string()),
        }
    }

    #[test]
    fn test_authorize_url() {
        let client = GitHubClient::new().unwrap();
        let url = client.authorize_url(&app(), Some("xyz 1"));

        assert!(url.starts_with("https://github.com/login/oauth/authorize?client_id=Iv1.abc"));
        assert!(url.contains("scope=read%3Auser"));
        assert!(url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fgithub%2Fcallback"
        ));
        assert!(url.ends_with("state=xyz%201"));
    }

    #[test]
    fn test_authorize_url_without_optional_params() {
        let client = GitHubClient::new().unwrap();
        let app = OAuthApp {
            redirect_uri: None,
            ..app()
        };
        let url = client.authorize_url(&app, None);
        assert!(!url.contains("redirect_uri"));
        assert!(!url.contains("state"));
    }

    #[test]
    fn test_summarize_user_skips_forks() {
        let repos: Vec<GitHubRepo> = serde_json::from_value(json!([
            repo_json("a", 10, 1, Some("Rust"), false),
            repo_json("b", 5, 2, Some("Rust"), false),
            repo_json("c", 3, 0, Some("TypeScript"), false),
            repo_json("d", 1000, 500, Some("Go"), true),
        ]))
        .unwrap();
        let user: GitHubUser = serde_json::from_value(user_json("octocat")).unwrap();

        let stats = summarize_user(user, &repos);
        assert_eq!(stats.total_stars, 18);
        assert_eq!(stats.total_forks, 3);
        assert_eq!(
            stats.top_languages,
            vec![
                LanguageCount {
                    language: "Rust".to_string(),
                    repos: 2
                },
                LanguageCount {
                    language: "TypeScript".to_string(),
                    repos: 1
                },
            ]
        );
    }

    #[test]
    fn test_summarize_user_limits_languages() {
        let repos: Vec<GitHubRepo> = serde_json::from_value(json!([
            repo_json("1", 0, 0, Some("Rust"), false),
            repo_json("2", 0, 0, Some("Go"), false),
            repo_json("3", 0, 0, Some("C"), false),
            repo_json("4", 0, 0, Some("Zig"), false),
            repo_json("5", 0, 0, Some("Elixir"), false),
            repo_json("6", 0, 0, Some("Haskell"), false),
            repo_json("7", 0, 0, Some("Rust"), false),
        ]))
        .unwrap();
        let user: GitHubUser = serde_json::from_value(user_json("octocat")).unwrap();

        let stats = summarize_user(user, &repos);
        let names: Vec<&str> = stats
            .top_languages
            .iter()
            .map(|l| l.language.as_str())
            .collect();
        assert_eq!(names, vec!["Rust", "C", "Elixir", "Go", "Haskell"]);
    }

    #[tokio::test]
    async fn test_exchange_code_success() {
        let (client, _) = spawn_github().await;

        let token = client.exchange_code(&app(), "good-code").await.unwrap();
        assert_eq!(token.access_token, "gho_abc");
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.scope, "read:user");
    }

    #[tokio::test]
    async fn test_exchange_code_rejected() {
        let (client, _) = spawn_github().await;

        let err = client.exchange_code(&app(), "stale").await.unwrap_err();
        match err {
            GitHubError::OAuth(msg) => assert!(msg.contains("incorrect or expired")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_authenticated_user() {
        let (client, _) = spawn_github().await;

        let user = client.authenticated_user("gho_abc").await.unwrap();
        assert_eq!(user.login, "octocat");
        assert_eq!(user.followers, 9000);

        let err = client.authenticated_user("wrong").await.unwrap_err();
        assert!(matches!(err, GitHubError::Api { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_user_stats_cached() {
        let (client, hits) = spawn_github().await;

        let stats = client.user_stats("octocat").await.unwrap();
        assert_eq!(stats.login, "octocat");
        assert_eq!(stats.total_stars, 18);
        assert_eq!(stats.followers, 9000);
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        // Lookups are case-insensitive and served from cache
        client.user_stats("OctoCat").await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_user_stats_not_found() {
        let (client, _) = spawn_github().await;

        let err = client.user_stats("ghost").await.unwrap_err();
        assert!(matches!(err, GitHubError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_repo_stats() {
        let (client, hits) = spawn_github().await;

        let stats = client.repo_stats("octocat", "devcred").await.unwrap();
        assert_eq!(stats.full_name, "octocat/devcred");
        assert_eq!(stats.stars, 42);
        assert_eq!(stats.watchers, 3);

        client.repo_stats("octocat", "devcred").await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_repo_stats_errors() {
        let (client, _) = spawn_github().await;

        let err = client.repo_stats("octocat", "missing").await.unwrap_err();
        assert!(matches!(err, GitHubError::NotFound(_)));

        let err = client.repo_stats("octocat", "limited").await.unwrap_err();
        assert!(matches!(err, GitHubError::Api { status: 403, .. }));
    }
}
