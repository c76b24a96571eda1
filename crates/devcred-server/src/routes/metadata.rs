use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use nft_metadata_resolver::ResolverError;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct MetadataParams {
    uri: Option<String>,
}

/// GET /metadata/{token_id}?uri=ipfs://...
/// Resolves token metadata through the cache, rewriting IPFS image links.
pub async fn get_metadata(
    State(state): State<AppState>,
    Path(token_id): Path<String>,
    Query(params): Query<MetadataParams>,
) -> Response {
    let uri = params.uri.unwrap_or_default();

    match state.resolver.resolve(&token_id, &uri).await {
        Ok(document) => Json(document).into_response(),
        Err(ResolverError::MissingUri) => {
            AppError::BadRequest("Missing uri parameter".into()).into_response()
        }
        Err(e) => {
            error!(token_id = %token_id, uri = %uri, error = %e, "Metadata resolution failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to resolve metadata" })),
            )
                .into_response()
        }
    }
}

/// POST /metadata/clear-cache
pub async fn clear_cache(State(state): State<AppState>) -> Json<Value> {
    state.resolver.invalidate_all().await;
    info!("Metadata cache cleared");
    Json(json!({ "success": true }))
}
