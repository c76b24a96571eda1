use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use github_client::RepoStats;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::reputation::Reputation;
use crate::state::AppState;
use crate::svg::render_badge;

/// GET /api/nft/{owner}/{repo}/metadata.json
/// ERC-721 style metadata for a repository's reputation NFT.
pub async fn metadata(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let stats = state.github.repo_stats(&owner, &repo).await?;
    let reputation = Reputation::for_repo(&stats);

    Ok(Json(build_metadata(&stats, &reputation, &state.public_url)))
}

/// GET /api/nft/{owner}/{repo}/image.svg
pub async fn image(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let stats = state.github.repo_stats(&owner, &repo).await?;
    let reputation = Reputation::for_repo(&stats);

    Ok((
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=600"),
        ],
        render_badge(&stats, &reputation),
    ))
}

fn build_metadata(repo: &RepoStats, reputation: &Reputation, public_url: &str) -> Value {
    let description = match repo.description.as_deref() {
        Some(desc) if !desc.is_empty() => {
            format!("DevCred reputation for {}: {}", repo.full_name, desc)
        }
        _ => format!("DevCred reputation for {}", repo.full_name),
    };

    json!({
        "name": format!("DevCred: {}", repo.full_name),
        "description": description,
        "image": format!("{}/api/nft/{}/{}/image.svg", public_url, repo.owner, repo.name),
        "external_url": repo.html_url,
        "attributes": [
            { "trait_type": "Tier", "value": reputation.tier.label() },
            { "trait_type": "Score", "value": reputation.score },
            { "trait_type": "Stars", "value": repo.stars },
            { "trait_type": "Forks", "value": repo.forks },
            { "trait_type": "Language", "value": repo.language.as_deref().unwrap_or("Unknown") },
        ],
    })
}
