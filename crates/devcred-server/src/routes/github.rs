use axum::extract::{Path, State};
use axum::Json;
use github_client::{RepoStats, UserStats};
use serde::Serialize;

use crate::error::AppError;
use crate::reputation::Reputation;
use crate::state::AppState;

#[derive(Serialize)]
pub struct RepoResponse {
    #[serde(flatten)]
    pub repo: RepoStats,
    pub reputation: Reputation,
}

/// GET /api/github/users/{username}/stats
pub async fn user_stats(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserStats>, AppError> {
    let stats = state.github.user_stats(&username).await?;
    Ok(Json(stats.as_ref().clone()))
}

/// GET /api/github/repos/{owner}/{repo}
pub async fn repo_stats(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Result<Json<RepoResponse>, AppError> {
    let stats = state.github.repo_stats(&owner, &repo).await?;
    let reputation = Reputation::for_repo(&stats);

    Ok(Json(RepoResponse {
        repo: stats.as_ref().clone(),
        reputation,
    }))
}
