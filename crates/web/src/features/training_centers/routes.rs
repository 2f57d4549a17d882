use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{create_training_center, get_training_center, list_training_centers};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_training_center))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/", get(list_training_centers))
        .route("/:id", get(get_training_center))
        .merge(protected)
}
