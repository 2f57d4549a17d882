use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::category::CreateCategoryRequest, models::Category};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::extract::{JsonBody, PathParam};

use super::services;

#[utoipa::path(
    get,
    path = "/categorias",
    responses(
        (status = 200, description = "List all categories", body = Vec<Category>)
    ),
    tag = "categories"
)]
pub async fn list_categories(State(db): State<Database>) -> Result<Response, WebError> {
    let categories = services::list_categories(&db).await?;

    Ok(Json(categories).into_response())
}

#[utoipa::path(
    get,
    path = "/categorias/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(db): State<Database>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Response, WebError> {
    let category = services::get_category(&db, id).await?;

    Ok(Json(category).into_response())
}

#[utoipa::path(
    post,
    path = "/categorias",
    request_body = CreateCategoryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Category created successfully", body = Category),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 409, description = "Category name already taken")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(db): State<Database>,
    JsonBody(req): JsonBody<CreateCategoryRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let category = services::create_category(&db, &req).await?;

    Ok((StatusCode::CREATED, Json(category)).into_response())
}
