use chrono::Utc;
use storage::{HackathonStore, error::Result, models::TrashedHackathon, services};

pub async fn list_trash(store: &dyn HackathonStore) -> Result<Vec<TrashedHackathon>> {
    store.list_trash().await
}

/// Remove entries whose retention has run out
pub async fn purge_expired(store: &dyn HackathonStore) -> Result<u64> {
    services::purge_trash(store, Utc::now()).await
}
