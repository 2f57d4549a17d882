use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::auth::{RegisterRequest, TokenRequest, TokenResponse, UserResponse};
use validator::Validate;

use crate::error::WebError;
use crate::extract::{FormBody, JsonBody};
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let user = services::register_user(&state.db, state.bcrypt_cost, &req).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))).into_response())
}

#[utoipa::path(
    post,
    path = "/auth/token",
    request_body(content = TokenRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 401, description = "Incorrect email or password")
    ),
    tag = "auth"
)]
pub async fn login_for_access_token(
    State(state): State<AppState>,
    FormBody(form): FormBody<TokenRequest>,
) -> Result<Response, WebError> {
    let token =
        services::issue_token(&state.db, &state.tokens, &form.username, &form.password).await?;

    Ok(Json(token).into_response())
}

#[utoipa::path(
    get,
    path = "/auth/me",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing, invalid or expired token")
    ),
    tag = "auth"
)]
pub async fn read_current_user(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Response {
    Json(UserResponse::from(user)).into_response()
}
