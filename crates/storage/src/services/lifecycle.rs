use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::trash::DEFAULT_TRASH_RETENTION_DAYS;
use crate::models::{HackathonStatus, HackathonUpdate, TrashedHackathon};
use crate::store::HackathonStore;

/// How long trashed hackathons are kept before `purge_trash` removes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrashPolicy {
    pub retention: Duration,
}

impl TrashPolicy {
    pub fn days(days: i64) -> Self {
        Self {
            retention: Duration::days(days),
        }
    }
}

impl Default for TrashPolicy {
    fn default() -> Self {
        Self::days(DEFAULT_TRASH_RETENTION_DAYS)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusRefresh {
    pub checked: usize,
    pub changed: usize,
    pub failed: usize,
}

/// Copies a hackathon into the trash area, then removes it from the primary
/// collection.
pub async fn move_to_trash<S>(
    store: &S,
    id: Uuid,
    now: DateTime<Utc>,
    policy: TrashPolicy,
) -> Result<TrashedHackathon>
where
    S: HackathonStore + ?Sized,
{
    let hackathon = store.find_by_id(id).await?;
    let entry = TrashedHackathon::new(hackathon, now, policy.retention);

    store.insert_trash(&entry).await?;
    store.delete(id).await?;

    tracing::info!(
        "Moved '{}' to trash, auto delete after {}",
        entry.hackathon.record.title,
        entry.auto_delete_after
    );

    Ok(entry)
}

pub async fn purge_trash<S>(store: &S, now: DateTime<Utc>) -> Result<u64>
where
    S: HackathonStore + ?Sized,
{
    let purged = store.purge_trash(now).await?;
    if purged > 0 {
        tracing::info!("Purged {} expired trash entries", purged);
    }
    Ok(purged)
}

/// Status of a single stored hackathon, recomputed at `now`.
pub async fn refresh_status<S>(store: &S, id: Uuid, now: DateTime<Utc>) -> Result<HackathonStatus>
where
    S: HackathonStore + ?Sized,
{
    let hackathon = store.find_by_id(id).await?;
    let status = hackathon.record.schedule.status_at(now);

    if status != hackathon.record.status {
        store
            .update(id, &HackathonUpdate::status(status), now)
            .await?;
    }

    Ok(status)
}

/// Recomputes every stored status. A record that fails to update is logged
/// and counted, the sweep carries on.
pub async fn refresh_statuses<S>(store: &S, now: DateTime<Utc>) -> Result<StatusRefresh>
where
    S: HackathonStore + ?Sized,
{
    let mut refresh = StatusRefresh::default();

    for hackathon in store.list_all().await? {
        refresh.checked += 1;

        if hackathon.record.status == HackathonStatus::Trashed {
            continue;
        }

        let status = hackathon.record.schedule.status_at(now);
        if status == hackathon.record.status {
            continue;
        }

        match store
            .update(hackathon.id, &HackathonUpdate::status(status), now)
            .await
        {
            Ok(_) => {
                tracing::debug!(
                    "Status of '{}': {} -> {}",
                    hackathon.record.title,
                    hackathon.record.status,
                    status
                );
                refresh.changed += 1;
            }
            Err(e) => {
                tracing::error!("Failed to refresh status of '{}': {}", hackathon.record.title, e);
                refresh.failed += 1;
            }
        }
    }

    tracing::info!(
        "Status sweep: {} checked, {} changed",
        refresh.checked,
        refresh.changed
    );

    Ok(refresh)
}
