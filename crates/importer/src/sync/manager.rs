use chrono::{DateTime, Utc};
use std::sync::Arc;
use storage::HackathonStore;
use storage::models::{Hackathon, HackathonRecord, HackathonUpdate};
use storage::services;
use tracing::{debug, error, info, warn};
use uuid::Uuid;
use validator::Validate;

use super::stats::{SyncReport, SyncStats};
use crate::config::SyncConfig;
use crate::error::Result;

/// What reconciling one candidate did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciled {
    Inserted(Uuid),
    Updated {
        id: Uuid,
        fields: Vec<&'static str>,
    },
    Unchanged(Uuid),
    Skipped(String),
}

/// Reconciles scraped candidates against the store: inserts new hackathons,
/// updates re-scraped ones in place, and keeps statuses and trash current.
pub struct SyncManager<S: ?Sized> {
    store: Arc<S>,
    config: SyncConfig,
}

impl<S: HackathonStore + ?Sized> SyncManager<S> {
    pub fn new(store: Arc<S>, config: SyncConfig) -> Self {
        Self { store, config }
    }

    /// Drops candidates whose registration deadline has already passed.
    pub fn filter_expired(
        candidates: Vec<HackathonRecord>,
        now: DateTime<Utc>,
    ) -> (Vec<HackathonRecord>, usize) {
        let before = candidates.len();
        let active: Vec<HackathonRecord> = candidates
            .into_iter()
            .filter(|c| c.schedule.registration_deadline() > now)
            .collect();
        let dropped = before - active.len();

        info!(
            "Filtered to {} ongoing/upcoming hackathons (removed {} expired)",
            active.len(),
            dropped
        );
        (active, dropped)
    }

    /// Full run: filter, reconcile each candidate, sweep statuses, purge trash.
    /// Per-candidate failures are logged and counted, never fatal.
    pub async fn sync(
        &self,
        candidates: Vec<HackathonRecord>,
        now: DateTime<Utc>,
    ) -> Result<SyncReport> {
        info!("Starting hackathon sync with {} candidates", candidates.len());

        let (active, expired) = Self::filter_expired(candidates, now);
        let mut stats = SyncStats {
            expired_filtered: expired,
            ..SyncStats::default()
        };

        for candidate in active {
            let title = candidate.title.trim().to_string();
            match self.reconcile(candidate, now, &mut stats).await {
                Ok(Reconciled::Skipped(reason)) => {
                    warn!("Skipping candidate '{}': {}", title, reason);
                }
                Ok(_) => {}
                Err(e) => {
                    error!("Failed to sync '{}': {}", title, e);
                    stats.failed += 1;
                }
            }
        }

        let sweep = services::refresh_statuses(self.store.as_ref(), now).await?;
        let trash_purged = services::purge_trash(self.store.as_ref(), now).await?;
        let status_breakdown = self.store.count_by_status().await?;

        Ok(SyncReport {
            stats,
            sweep,
            trash_purged,
            status_breakdown,
        })
    }

    /// Inserts the candidate or reconciles it with its stored duplicate.
    pub async fn reconcile(
        &self,
        candidate: HackathonRecord,
        now: DateTime<Utc>,
        stats: &mut SyncStats,
    ) -> Result<Reconciled> {
        let candidate = candidate.normalized();

        if candidate.title.is_empty() {
            stats.invalid_skipped += 1;
            return Ok(Reconciled::Skipped("no title".to_string()));
        }
        if let Err(e) = candidate.validate() {
            stats.invalid_skipped += 1;
            return Ok(Reconciled::Skipped(e.to_string()));
        }

        match self.store.find_duplicate(&candidate.duplicate_key()).await? {
            Some(existing) => self.update_existing(existing, &candidate, now, stats).await,
            None => self.insert_new(candidate, now, stats).await,
        }
    }

    async fn update_existing(
        &self,
        existing: Hackathon,
        candidate: &HackathonRecord,
        now: DateTime<Utc>,
        stats: &mut SyncStats,
    ) -> Result<Reconciled> {
        let update = stage_update(&existing, candidate, now);

        if update.is_empty() {
            stats.duplicates_skipped += 1;
            debug!("Skipped duplicate: {}", existing.record.title);
            return Ok(Reconciled::Unchanged(existing.id));
        }

        self.store.update(existing.id, &update, now).await?;

        if update.status.is_some() {
            stats.status_updates += 1;
        }
        stats.updated_hackathons += 1;
        info!("Updated: {}", existing.record.title);

        Ok(Reconciled::Updated {
            id: existing.id,
            fields: update.changed_fields(),
        })
    }

    async fn insert_new(
        &self,
        mut candidate: HackathonRecord,
        now: DateTime<Utc>,
        stats: &mut SyncStats,
    ) -> Result<Reconciled> {
        candidate.status = candidate.schedule.status_at(now);
        let hackathon = Hackathon::new(candidate, self.config.actor.as_str(), now);

        self.store.insert(&hackathon).await?;

        stats.new_hackathons += 1;
        info!("Added new: {}", hackathon.record.title);
        Ok(Reconciled::Inserted(hackathon.id))
    }

    pub async fn move_to_trash(&self, id: Uuid, now: DateTime<Utc>) -> Result<()> {
        services::move_to_trash(self.store.as_ref(), id, now, self.config.trash).await?;
        Ok(())
    }
}

/// Changes a re-scraped candidate brings to its stored duplicate: prizes,
/// registration deadline, website and organizer when the candidate carries a
/// different value, plus the status derived from the dates as they will be
/// stored after the update.
pub fn stage_update(
    existing: &Hackathon,
    candidate: &HackathonRecord,
    now: DateTime<Utc>,
) -> HackathonUpdate {
    let stored = &existing.record;
    let mut update = HackathonUpdate::default();

    let schedule = stored
        .schedule
        .with_registration_deadline(candidate.schedule.registration_deadline());
    if schedule.registration_deadline() != stored.schedule.registration_deadline() {
        update.registration_deadline = Some(schedule.registration_deadline());
    }

    let status = schedule.status_at(now);
    if status != stored.status {
        update.status = Some(status);
    }

    if !candidate.prizes.is_empty() && candidate.prizes != stored.prizes {
        update.prizes = Some(candidate.prizes.clone());
    }

    if let Some(website) = &candidate.links.website {
        if !website.is_empty() && stored.links.website.as_ref() != Some(website) {
            update.website = Some(website.clone());
        }
    }

    if !candidate.organizer.is_empty() && candidate.organizer != stored.organizer {
        update.organizer = Some(candidate.organizer.clone());
    }

    update
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use storage::MemoryStore;
    use storage::models::{HackathonStatus, Links, Location, Prize, Schedule};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn candidate(title: &str) -> HackathonRecord {
        let schedule = Schedule::clamped(
            now() + Duration::days(5),
            now() + Duration::days(10),
            now() + Duration::days(12),
        );
        let mut record = HackathonRecord::new(title, schedule);
        record.organizer = "Acme".to_string();
        record.prizes = vec![Prize::new("1st", 1_000)];
        record.links = Links::website("https://unstop.com/hackathons/x");
        record
    }

    fn manager(store: Arc<MemoryStore>) -> SyncManager<MemoryStore> {
        SyncManager::new(store, SyncConfig::default())
    }

    #[test]
    fn test_filter_expired() {
        let mut expired = candidate("Old");
        expired.schedule = Schedule::clamped(
            now() - Duration::days(1),
            now() + Duration::days(2),
            now() + Duration::days(3),
        );
        let (active, dropped) =
            SyncManager::<MemoryStore>::filter_expired(vec![expired, candidate("New")], now());
        assert_eq!(dropped, 1);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "New");
    }

    #[tokio::test]
    async fn test_insert_then_unchanged() {
        let store = Arc::new(MemoryStore::new());
        let manager = manager(store.clone());
        let mut stats = SyncStats::default();

        let first = manager.reconcile(candidate("AI Hack"), now(), &mut stats).await.unwrap();
        assert!(matches!(first, Reconciled::Inserted(_)));

        let second = manager.reconcile(candidate("ai hack"), now(), &mut stats).await.unwrap();
        assert!(matches!(second, Reconciled::Unchanged(_)));

        assert_eq!(stats.new_hackathons, 1);
        assert_eq!(stats.duplicates_skipped, 1);
        assert_eq!(store.hackathon_count().await, 1);

        let stored = store.list_all().await.unwrap();
        assert_eq!(stored[0].created_by, "system:importer");
        assert_eq!(stored[0].record.status, HackathonStatus::Upcoming);
    }

    #[tokio::test]
    async fn test_blank_title_is_skipped() {
        let store = Arc::new(MemoryStore::new());
        let manager = manager(store.clone());
        let mut stats = SyncStats::default();

        let outcome = manager.reconcile(candidate("   "), now(), &mut stats).await.unwrap();
        assert!(matches!(outcome, Reconciled::Skipped(_)));
        assert_eq!(stats.invalid_skipped, 1);
        assert_eq!(store.hackathon_count().await, 0);
    }

    #[tokio::test]
    async fn test_same_title_different_venue_is_new() {
        let store = Arc::new(MemoryStore::new());
        let manager = manager(store.clone());
        let mut stats = SyncStats::default();

        let mut offline = candidate("AI Hack");
        offline.location = Location::offline("Pune", Default::default());
        manager.reconcile(candidate("AI Hack"), now(), &mut stats).await.unwrap();
        manager.reconcile(offline, now(), &mut stats).await.unwrap();

        assert_eq!(stats.new_hackathons, 2);
        assert_eq!(store.hackathon_count().await, 2);
    }

    #[test]
    fn test_stage_update_allow_list() {
        let existing = Hackathon::new(candidate("AI Hack"), "test", now());

        let mut incoming = candidate("AI Hack");
        incoming.organizer = "Acme Corp".to_string();
        incoming.description = "Entirely different text".to_string();
        incoming.tags = vec!["new".to_string()];
        incoming.links = Links::default();
        incoming.prizes = Vec::new();

        let update = stage_update(&existing, &incoming, now());
        assert_eq!(update.changed_fields(), vec!["organizer"]);
    }

    #[test]
    fn test_stage_update_clamps_incoming_deadline() {
        let existing = Hackathon::new(candidate("AI Hack"), "test", now());
        let start = existing.record.schedule.start_date();

        let mut incoming = candidate("AI Hack");
        incoming.schedule = Schedule::clamped(
            start + Duration::days(3),
            start + Duration::days(5),
            start + Duration::days(6),
        );

        let update = stage_update(&existing, &incoming, now());
        assert_eq!(update.registration_deadline, Some(start - Duration::days(1)));
    }

    #[test]
    fn test_stage_update_recomputes_status_from_stored_dates() {
        let existing = Hackathon::new(candidate("AI Hack"), "test", now());
        let later = now() + Duration::days(6);

        let update = stage_update(&existing, &candidate("AI Hack"), later);
        assert_eq!(update.status, Some(HackathonStatus::RegistrationClosed));
        assert_eq!(update.changed_fields(), vec!["status"]);
    }

    #[test]
    fn test_stage_update_status_follows_extended_deadline() {
        let mut existing = Hackathon::new(candidate("AI Hack"), "test", now());
        let later = now() + Duration::days(6);
        existing.record.status = HackathonStatus::RegistrationClosed;

        let mut incoming = candidate("AI Hack");
        incoming.schedule = existing
            .record
            .schedule
            .with_registration_deadline(later + Duration::days(2));

        let update = stage_update(&existing, &incoming, later);
        assert_eq!(update.registration_deadline, Some(later + Duration::days(2)));
        assert_eq!(update.status, Some(HackathonStatus::Upcoming));
        assert_eq!(update.changed_fields(), vec!["status", "registrationDeadline"]);
    }

    #[tokio::test]
    async fn test_reconcile_extended_deadline_keeps_status_consistent() {
        let store = Arc::new(MemoryStore::new());
        let manager = manager(store.clone());
        let mut stats = SyncStats::default();
        manager.reconcile(candidate("AI Hack"), now(), &mut stats).await.unwrap();

        let later = now() + Duration::days(6);
        let id = store.list_all().await.unwrap()[0].id;
        services::refresh_status(store.as_ref(), id, later).await.unwrap();

        let mut incoming = candidate("AI Hack");
        incoming.schedule = incoming
            .schedule
            .with_registration_deadline(later + Duration::days(2));
        manager.reconcile(incoming, later, &mut stats).await.unwrap();

        let stored = store.find_by_id(id).await.unwrap();
        assert_eq!(stored.record.status, HackathonStatus::Upcoming);
        assert_eq!(stored.record.status, stored.record.schedule.status_at(later));
        assert_eq!(stats.status_updates, 1);
    }
}
