use chrono::Utc;
use storage::{
    HackathonStore,
    dto::common::{PaginatedResponse, PaginationParams},
    dto::hackathon::{
        CreateHackathonRequest, FEATURED_LIMIT, HackathonStats, StatusResponse,
        UpdateHackathonRequest,
    },
    error::{Result, StorageError},
    models::{Hackathon, HackathonRecord, TrashedHackathon},
    services::{self, TrashPolicy},
    store::{HackathonFilter, HackathonSort},
};
use uuid::Uuid;

use crate::error::WebError;

/// `created_by` of hackathons added through the API
pub const API_ACTOR: &str = "api";

/// One page of hackathons matching the filter
pub async fn list_hackathons(
    store: &dyn HackathonStore,
    filter: &HackathonFilter,
    sort: HackathonSort,
    params: PaginationParams,
) -> Result<PaginatedResponse<Hackathon>> {
    let (data, total) = store
        .search(filter, sort, params.offset(), params.limit())
        .await?;
    Ok(PaginatedResponse::new(data, params, total))
}

/// Upcoming hackathons, soonest first
pub async fn list_upcoming(store: &dyn HackathonStore, limit: u32) -> Result<Vec<Hackathon>> {
    let (data, _) = store
        .search(&HackathonFilter::upcoming(), HackathonSort::default(), 0, limit)
        .await?;
    Ok(data)
}

/// Featured hackathons, soonest first
pub async fn list_featured(store: &dyn HackathonStore) -> Result<Vec<Hackathon>> {
    let filter = HackathonFilter {
        featured: Some(true),
        ..HackathonFilter::default()
    };
    let (data, _) = store
        .search(&filter, HackathonSort::default(), 0, FEATURED_LIMIT)
        .await?;
    Ok(data)
}

pub async fn get_stats(store: &dyn HackathonStore) -> Result<HackathonStats> {
    let by_status = store.count_by_status().await?;
    let by_category = store.count_by_category().await?;
    Ok(HackathonStats::new(by_status, by_category))
}

pub async fn get_hackathon(store: &dyn HackathonStore, id: Uuid) -> Result<Hackathon> {
    store.find_by_id(id).await
}

pub async fn create_hackathon(
    store: &dyn HackathonStore,
    request: CreateHackathonRequest,
) -> Result<Hackathon> {
    let now = Utc::now();
    let record = request.into_record(now);
    ensure_unique(store, &record, None).await?;

    let hackathon = Hackathon::new(record, API_ACTOR, now);
    store.insert(&hackathon).await?;

    tracing::info!("Created hackathon '{}' ({})", hackathon.record.title, hackathon.id);
    Ok(hackathon)
}

/// Merge the request into the stored document and write it back whole
pub async fn update_hackathon(
    store: &dyn HackathonStore,
    id: Uuid,
    request: &UpdateHackathonRequest,
) -> std::result::Result<Hackathon, WebError> {
    let mut hackathon = store.find_by_id(id).await?;
    request
        .apply(&mut hackathon, Utc::now())
        .map_err(WebError::BadRequest)?;
    ensure_unique(store, &hackathon.record, Some(id)).await?;

    store.replace(&hackathon).await?;
    Ok(hackathon)
}

pub async fn delete_hackathon(store: &dyn HackathonStore, id: Uuid) -> Result<()> {
    store.delete(id).await?;
    tracing::info!("Deleted hackathon {}", id);
    Ok(())
}

pub async fn trash_hackathon(
    store: &dyn HackathonStore,
    id: Uuid,
    policy: TrashPolicy,
) -> Result<TrashedHackathon> {
    services::move_to_trash(store, id, Utc::now(), policy).await
}

/// Recompute one status from the stored dates
pub async fn refresh_status(store: &dyn HackathonStore, id: Uuid) -> Result<StatusResponse> {
    let status = services::refresh_status(store, id, Utc::now()).await?;
    Ok(StatusResponse { id, status })
}

/// Title and venue must not collide with another live hackathon
async fn ensure_unique(
    store: &dyn HackathonStore,
    record: &HackathonRecord,
    own_id: Option<Uuid>,
) -> Result<()> {
    match store.find_duplicate(&record.duplicate_key()).await? {
        Some(existing) if Some(existing.id) != own_id => Err(StorageError::ConstraintViolation(
            format!(
                "Hackathon '{}' at {} already exists",
                existing.record.title,
                existing.record.location.venue()
            ),
        )),
        _ => Ok(()),
    }
}
