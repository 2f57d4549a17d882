use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{login_for_access_token, read_current_user, register};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(read_current_user))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/register", post(register))
        .route("/token", post(login_for_access_token))
        .merge(protected)
}
