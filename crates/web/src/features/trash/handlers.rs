use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{dto::hackathon::PurgeResponse, models::TrashedHackathon};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/trash",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Trashed hackathons awaiting deletion", body = Vec<TrashedHackathon>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "trash"
)]
pub async fn list_trash(State(state): State<AppState>) -> Result<Response, WebError> {
    let entries = services::list_trash(state.store.as_ref()).await?;

    Ok(Json(entries).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/trash/expired",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Expired trash entries removed", body = PurgeResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "trash"
)]
pub async fn purge_expired(State(state): State<AppState>) -> Result<Response, WebError> {
    let purged = services::purge_expired(state.store.as_ref()).await?;

    Ok(Json(PurgeResponse { purged }).into_response())
}
