//! In-memory store for tests and dry runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{
    Category, DuplicateKey, Hackathon, HackathonStatus, HackathonUpdate, TrashedHackathon,
};
use crate::store::{HackathonFilter, HackathonSort, HackathonStore};

/// Keeps both collections in maps and records every update it applies, so
/// tests can assert on exactly which fields a sync touched.
#[derive(Default)]
pub struct MemoryStore {
    hackathons: RwLock<HashMap<Uuid, Hackathon>>,
    trash: RwLock<HashMap<Uuid, TrashedHackathon>>,
    updates: RwLock<Vec<(Uuid, HackathonUpdate)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_hackathons(hackathons: impl IntoIterator<Item = Hackathon>) -> Self {
        let store = Self::new();
        {
            let mut map = store.hackathons.write().await;
            for hackathon in hackathons {
                map.insert(hackathon.id, hackathon);
            }
        }
        store
    }

    pub async fn hackathon_count(&self) -> usize {
        self.hackathons.read().await.len()
    }

    pub async fn trash_count(&self) -> usize {
        self.trash.read().await.len()
    }

    /// Updates applied so far, in order.
    pub async fn applied_updates(&self) -> Vec<(Uuid, HackathonUpdate)> {
        self.updates.read().await.clone()
    }

    async fn sorted(&self, sort: HackathonSort) -> Vec<Hackathon> {
        let mut all: Vec<Hackathon> = self.hackathons.read().await.values().cloned().collect();
        all.sort_by(|a, b| sort.compare(a, b));
        all
    }
}

#[async_trait]
impl HackathonStore for MemoryStore {
    async fn find_duplicate(&self, key: &DuplicateKey) -> Result<Option<Hackathon>> {
        Ok(self
            .hackathons
            .read()
            .await
            .values()
            .find(|h| h.record.status != HackathonStatus::Trashed && &h.duplicate_key() == key)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Hackathon> {
        self.hackathons
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn insert(&self, hackathon: &Hackathon) -> Result<()> {
        let mut map = self.hackathons.write().await;
        if map.contains_key(&hackathon.id) {
            return Err(StorageError::ConstraintViolation(format!(
                "Hackathon {} already exists",
                hackathon.id
            )));
        }
        map.insert(hackathon.id, hackathon.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        update: &HackathonUpdate,
        now: DateTime<Utc>,
    ) -> Result<Hackathon> {
        let mut map = self.hackathons.write().await;
        let hackathon = map.get_mut(&id).ok_or(StorageError::NotFound)?;
        update.apply(hackathon, now);
        let updated = hackathon.clone();
        drop(map);

        self.updates.write().await.push((id, update.clone()));
        Ok(updated)
    }

    async fn replace(&self, hackathon: &Hackathon) -> Result<()> {
        let mut map = self.hackathons.write().await;
        let stored = map.get_mut(&hackathon.id).ok_or(StorageError::NotFound)?;
        *stored = hackathon.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.hackathons
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }

    async fn list_all(&self) -> Result<Vec<Hackathon>> {
        Ok(self.sorted(HackathonSort::default()).await)
    }

    async fn search(
        &self,
        filter: &HackathonFilter,
        sort: HackathonSort,
        offset: u32,
        limit: u32,
    ) -> Result<(Vec<Hackathon>, i64)> {
        let matching: Vec<Hackathon> = self
            .sorted(sort)
            .await
            .into_iter()
            .filter(|h| filter.matches(h))
            .collect();
        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn insert_trash(&self, entry: &TrashedHackathon) -> Result<()> {
        self.trash
            .write()
            .await
            .insert(entry.hackathon.id, entry.clone());
        Ok(())
    }

    async fn list_trash(&self) -> Result<Vec<TrashedHackathon>> {
        let mut entries: Vec<TrashedHackathon> = self.trash.read().await.values().cloned().collect();
        entries.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        Ok(entries)
    }

    async fn purge_trash(&self, now: DateTime<Utc>) -> Result<u64> {
        let mut trash = self.trash.write().await;
        let before = trash.len();
        trash.retain(|_, entry| !entry.is_expired(now));
        Ok((before - trash.len()) as u64)
    }

    async fn count_by_status(&self) -> Result<Vec<(HackathonStatus, i64)>> {
        let mut counts: BTreeMap<HackathonStatus, i64> = BTreeMap::new();
        for hackathon in self.hackathons.read().await.values() {
            *counts.entry(hackathon.record.status).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn count_by_category(&self) -> Result<Vec<(Category, i64)>> {
        let map = self.hackathons.read().await;
        Ok(Category::ALL
            .into_iter()
            .map(|category| {
                let count = map
                    .values()
                    .filter(|h| h.record.category == category)
                    .count() as i64;
                (category, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect())
    }
}
