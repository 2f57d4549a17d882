use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        athlete::{
            AthleteListParams, AthleteResponse, AthleteSummary, CreateAthleteRequest,
            UpdateAthleteRequest,
        },
        common::PaginatedResponse,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::extract::{JsonBody, PathParam, QueryParams};

use super::services;

#[utoipa::path(
    get,
    path = "/atletas",
    params(AthleteListParams),
    responses(
        (status = 200, description = "Paginated list of athletes", body = PaginatedResponse<AthleteSummary>),
        (status = 400, description = "Invalid pagination parameters")
    ),
    tag = "athletes"
)]
pub async fn list_athletes(
    State(db): State<Database>,
    QueryParams(params): QueryParams<AthleteListParams>,
) -> Result<Response, WebError> {
    let pagination = params.pagination();
    pagination.validate().map_err(WebError::BadRequest)?;

    let (athletes, total_items) =
        services::query_athletes_page(&db, &params.filter(), &pagination).await?;

    let data: Vec<AthleteSummary> = athletes.into_iter().map(AthleteSummary::from).collect();

    Ok(Json(PaginatedResponse::new(
        data,
        pagination.page,
        pagination.page_size,
        total_items,
    ))
    .into_response())
}

#[utoipa::path(
    get,
    path = "/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete ID")
    ),
    responses(
        (status = 200, description = "Athlete found", body = AthleteResponse),
        (status = 404, description = "Athlete not found")
    ),
    tag = "athletes"
)]
pub async fn get_athlete(
    State(db): State<Database>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Response, WebError> {
    let athlete = services::get_athlete(&db, id).await?;

    Ok(Json(AthleteResponse::from(athlete)).into_response())
}

#[utoipa::path(
    post,
    path = "/atletas",
    request_body = CreateAthleteRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Athlete created successfully", body = AthleteResponse),
        (status = 400, description = "Validation error or unknown category/training center"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 409, description = "National id already registered")
    ),
    tag = "athletes"
)]
pub async fn create_athlete(
    State(db): State<Database>,
    JsonBody(req): JsonBody<CreateAthleteRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let athlete = services::create_athlete(&db, &req).await?;

    Ok((StatusCode::CREATED, Json(AthleteResponse::from(athlete))).into_response())
}

#[utoipa::path(
    patch,
    path = "/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete ID")
    ),
    request_body = UpdateAthleteRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Athlete updated successfully", body = AthleteResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "athletes"
)]
pub async fn update_athlete(
    State(db): State<Database>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(req): JsonBody<UpdateAthleteRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let athlete = services::update_athlete(&db, id, &req).await?;

    Ok(Json(AthleteResponse::from(athlete)).into_response())
}

#[utoipa::path(
    delete,
    path = "/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Athlete deleted successfully"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "athletes"
)]
pub async fn delete_athlete(
    State(db): State<Database>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Response, WebError> {
    services::delete_athlete(&db, id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
