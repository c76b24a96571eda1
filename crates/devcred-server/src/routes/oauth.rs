use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginParams {
    state: Option<String>,
}

/// GET /auth/github/login?state=...
/// Returns JSON { url: "..." } for the frontend to redirect to.
pub async fn login(
    State(state): State<AppState>,
    Query(params): Query<LoginParams>,
) -> Result<Json<Value>, AppError> {
    let app = state
        .oauth_app
        .as_deref()
        .ok_or_else(|| AppError::NotConfigured("GitHub OAuth is not configured".into()))?;

    let url = state.github.authorize_url(app, params.state.as_deref());
    Ok(Json(json!({ "url": url })))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// GET /auth/github/callback?code=...
/// Exchanges the authorization code and returns the token with the linked account.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Json<Value>, AppError> {
    let app = state
        .oauth_app
        .as_deref()
        .ok_or_else(|| AppError::NotConfigured("GitHub OAuth is not configured".into()))?;

    if let Some(error) = params.error {
        warn!(error = %error, "GitHub authorization denied");
        return Err(AppError::Unauthorized(
            params.error_description.unwrap_or(error),
        ));
    }

    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing code parameter".into()))?;

    let token = state.github.exchange_code(app, &code).await?;
    let user = state.github.authenticated_user(&token.access_token).await?;

    info!(login = %user.login, "GitHub account linked");

    Ok(Json(json!({
        "access_token": token.access_token,
        "token_type": token.token_type,
        "scope": token.scope,
        "user": user,
    })))
}
