use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::common::PaginatedResponse,
    dto::hackathon::{
        CreateHackathonRequest, HackathonQuery, HackathonStats, StatusResponse,
        UpdateHackathonRequest, UpcomingQuery,
    },
    models::{Hackathon, TrashedHackathon},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/hackathons",
    params(HackathonQuery),
    responses(
        (status = 200, description = "Paginated list of hackathons", body = PaginatedResponse<Hackathon>),
        (status = 400, description = "Invalid filter or pagination parameters")
    ),
    tag = "hackathons"
)]
pub async fn list_hackathons(
    State(state): State<AppState>,
    Query(query): Query<HackathonQuery>,
) -> Result<Response, WebError> {
    query.validate().map_err(WebError::BadRequest)?;

    let response = services::list_hackathons(
        state.store.as_ref(),
        &query.filter(),
        query.sort(),
        query.pagination(),
    )
    .await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/hackathons/upcoming",
    params(UpcomingQuery),
    responses(
        (status = 200, description = "Upcoming hackathons ordered by start date", body = Vec<Hackathon>),
        (status = 400, description = "Invalid limit")
    ),
    tag = "hackathons"
)]
pub async fn list_upcoming(
    State(state): State<AppState>,
    Query(query): Query<UpcomingQuery>,
) -> Result<Response, WebError> {
    query.validate().map_err(WebError::BadRequest)?;

    let hackathons = services::list_upcoming(state.store.as_ref(), query.limit).await?;

    Ok(Json(hackathons).into_response())
}

#[utoipa::path(
    get,
    path = "/api/hackathons/featured",
    responses(
        (status = 200, description = "Up to six featured hackathons ordered by start date", body = Vec<Hackathon>)
    ),
    tag = "hackathons"
)]
pub async fn list_featured(State(state): State<AppState>) -> Result<Response, WebError> {
    let hackathons = services::list_featured(state.store.as_ref()).await?;

    Ok(Json(hackathons).into_response())
}

#[utoipa::path(
    get,
    path = "/api/hackathons/stats",
    responses(
        (status = 200, description = "Counts per status and category", body = HackathonStats)
    ),
    tag = "hackathons"
)]
pub async fn get_stats(State(state): State<AppState>) -> Result<Response, WebError> {
    let stats = services::get_stats(state.store.as_ref()).await?;

    Ok(Json(stats).into_response())
}

#[utoipa::path(
    get,
    path = "/api/hackathons/{id}",
    params(
        ("id" = Uuid, Path, description = "Hackathon id")
    ),
    responses(
        (status = 200, description = "Hackathon found", body = Hackathon),
        (status = 404, description = "Hackathon not found")
    ),
    tag = "hackathons"
)]
pub async fn get_hackathon(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let hackathon = services::get_hackathon(state.store.as_ref(), id).await?;

    Ok(Json(hackathon).into_response())
}

#[utoipa::path(
    post,
    path = "/api/hackathons",
    request_body = CreateHackathonRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Hackathon created", body = Hackathon),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Same title and venue already listed")
    ),
    tag = "hackathons"
)]
pub async fn create_hackathon(
    State(state): State<AppState>,
    Json(req): Json<CreateHackathonRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    req.validate_dates().map_err(WebError::BadRequest)?;

    let hackathon = services::create_hackathon(state.store.as_ref(), req).await?;

    Ok((StatusCode::CREATED, Json(hackathon)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/hackathons/{id}",
    params(
        ("id" = Uuid, Path, description = "Hackathon id")
    ),
    request_body = UpdateHackathonRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Hackathon updated", body = Hackathon),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Hackathon not found"),
        (status = 409, description = "Same title and venue already listed")
    ),
    tag = "hackathons"
)]
pub async fn update_hackathon(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateHackathonRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_hackathon(state.store.as_ref(), id, &update_req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/hackathons/{id}",
    params(
        ("id" = Uuid, Path, description = "Hackathon id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Hackathon deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Hackathon not found")
    ),
    tag = "hackathons"
)]
pub async fn delete_hackathon(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_hackathon(state.store.as_ref(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    post,
    path = "/api/hackathons/{id}/trash",
    params(
        ("id" = Uuid, Path, description = "Hackathon id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Hackathon moved to trash", body = TrashedHackathon),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Hackathon not found")
    ),
    tag = "hackathons"
)]
pub async fn trash_hackathon(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let entry = services::trash_hackathon(state.store.as_ref(), id, state.trash).await?;

    Ok(Json(entry).into_response())
}

#[utoipa::path(
    post,
    path = "/api/hackathons/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Hackathon id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Status recomputed from the stored dates", body = StatusResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Hackathon not found")
    ),
    tag = "hackathons"
)]
pub async fn refresh_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let status = services::refresh_status(state.store.as_ref(), id).await?;

    Ok(Json(status).into_response())
}
