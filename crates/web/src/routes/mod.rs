use std::time::Duration;

use axum::{Json, Router, response::IntoResponse, routing::get};
use serde_json::json;
use tower::Layer;
use tower_http::{
    cors::{Any, CorsLayer},
    normalize_path::NormalizePathLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ApiDoc;
use crate::features::{athletes, auth, categories, training_centers};
use crate::state::AppState;

/// Build the full application.
///
/// Trailing slashes are stripped for API routes only; Swagger UI serves its index at
/// `/swagger-ui/`.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let api = Router::new()
        .route("/health", get(health))
        .nest("/auth", auth::routes::routes(state.clone()))
        .nest("/atletas", athletes::routes::routes(state.clone()))
        .nest("/categorias", categories::routes::routes(state.clone()))
        .nest(
            "/centros_treinamento",
            training_centers::routes::routes(state.clone()),
        )
        .with_state(state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(NormalizePathLayer::trim_trailing_slash().layer(api))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
