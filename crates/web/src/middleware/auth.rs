use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use storage::models::User;

use crate::error::WebError;
use crate::features::auth::services::resolve_current_user;
use crate::state::AppState;

/// User resolved from the bearer token, available to handlers behind `require_auth`
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Reject the request unless it carries a valid bearer token for an existing user
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let Some(token) = bearer_token(request.headers()) else {
        tracing::warn!("Request without bearer token");
        return Err(WebError::Unauthorized);
    };

    let user = resolve_current_user(&state.db, &state.tokens, &token).await?;
    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token.to_string())
    } else {
        None
    }
}
