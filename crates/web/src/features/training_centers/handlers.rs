use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database, dto::training_center::CreateTrainingCenterRequest, models::TrainingCenter,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::extract::{JsonBody, PathParam};

use super::services;

#[utoipa::path(
    get,
    path = "/centros_treinamento",
    responses(
        (status = 200, description = "List all training centers", body = Vec<TrainingCenter>)
    ),
    tag = "training_centers"
)]
pub async fn list_training_centers(State(db): State<Database>) -> Result<Response, WebError> {
    let training_centers = services::list_training_centers(&db).await?;

    Ok(Json(training_centers).into_response())
}

#[utoipa::path(
    get,
    path = "/centros_treinamento/{id}",
    params(
        ("id" = Uuid, Path, description = "Training center ID")
    ),
    responses(
        (status = 200, description = "Training center found", body = TrainingCenter),
        (status = 404, description = "Training center not found")
    ),
    tag = "training_centers"
)]
pub async fn get_training_center(
    State(db): State<Database>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Response, WebError> {
    let training_center = services::get_training_center(&db, id).await?;

    Ok(Json(training_center).into_response())
}

#[utoipa::path(
    post,
    path = "/centros_treinamento",
    request_body = CreateTrainingCenterRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Training center created successfully", body = TrainingCenter),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 409, description = "Training center name already taken")
    ),
    tag = "training_centers"
)]
pub async fn create_training_center(
    State(db): State<Database>,
    JsonBody(req): JsonBody<CreateTrainingCenterRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let training_center = services::create_training_center(&db, &req).await?;

    Ok((StatusCode::CREATED, Json(training_center)).into_response())
}
