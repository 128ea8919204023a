use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::cmp::Ordering;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    Category, Difficulty, DuplicateKey, Hackathon, HackathonStatus, HackathonUpdate, LocationKind,
    TrashedHackathon,
};

/// Document store for hackathons and their trash area.
///
/// Implemented by [`crate::HackathonRepository`] over PostgreSQL and by
/// [`crate::MemoryStore`] for tests and dry runs. All operations are
/// single-document writes; nothing here is transactional across documents.
#[async_trait]
pub trait HackathonStore: Send + Sync {
    /// Case-insensitive match on title and venue, ignoring trashed records.
    async fn find_duplicate(&self, key: &DuplicateKey) -> Result<Option<Hackathon>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Hackathon>;

    async fn insert(&self, hackathon: &Hackathon) -> Result<()>;

    /// Applies the staged fields and stamps `updated_at = now`.
    async fn update(&self, id: Uuid, update: &HackathonUpdate, now: DateTime<Utc>)
    -> Result<Hackathon>;

    /// Overwrites the whole stored document; `NotFound` when the id is unknown.
    async fn replace(&self, hackathon: &Hackathon) -> Result<()>;

    async fn delete(&self, id: Uuid) -> Result<()>;

    async fn list_all(&self) -> Result<Vec<Hackathon>>;

    /// Filtered page in the requested order, plus the total match count.
    async fn search(
        &self,
        filter: &HackathonFilter,
        sort: HackathonSort,
        offset: u32,
        limit: u32,
    ) -> Result<(Vec<Hackathon>, i64)>;

    async fn insert_trash(&self, entry: &TrashedHackathon) -> Result<()>;

    async fn list_trash(&self) -> Result<Vec<TrashedHackathon>>;

    /// Hard-deletes trash entries whose `auto_delete_after` is before `now`.
    async fn purge_trash(&self, now: DateTime<Utc>) -> Result<u64>;

    async fn count_by_status(&self) -> Result<Vec<(HackathonStatus, i64)>>;

    async fn count_by_category(&self) -> Result<Vec<(Category, i64)>>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HackathonFilter {
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
    pub status: Option<HackathonStatus>,
    pub location: Option<LocationKind>,
    pub featured: Option<bool>,
    /// Case-insensitive substring of title, organizer or description.
    pub search: Option<String>,
}

impl HackathonFilter {
    pub fn upcoming() -> Self {
        Self {
            status: Some(HackathonStatus::Upcoming),
            ..Self::default()
        }
    }

    /// Trimmed, lower-cased search term; `None` when blank.
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches(&self, hackathon: &Hackathon) -> bool {
        let record = &hackathon.record;

        if record.status == HackathonStatus::Trashed {
            return false;
        }
        if self.category.is_some_and(|c| c != record.category) {
            return false;
        }
        if self.difficulty.is_some_and(|d| d != record.difficulty) {
            return false;
        }
        if self.status.is_some_and(|s| s != record.status) {
            return false;
        }
        if self.location.is_some_and(|l| l != record.location.kind()) {
            return false;
        }
        if self.featured.is_some_and(|f| f != record.featured) {
            return false;
        }

        match self.search_term() {
            Some(term) => [&record.title, &record.organizer, &record.description]
                .iter()
                .any(|field| field.to_lowercase().contains(&term)),
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    StartDate,
    RegistrationDeadline,
    Title,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Ordering of a search page. Ties on the sort field fall back to title,
/// then id, so pages stay stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HackathonSort {
    pub field: SortField,
    pub order: SortOrder,
}

impl HackathonSort {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    pub fn compare(&self, a: &Hackathon, b: &Hackathon) -> Ordering {
        let primary = match self.field {
            SortField::StartDate => a
                .record
                .schedule
                .start_date()
                .cmp(&b.record.schedule.start_date()),
            SortField::RegistrationDeadline => a
                .record
                .schedule
                .registration_deadline()
                .cmp(&b.record.schedule.registration_deadline()),
            SortField::Title => a.record.title.cmp(&b.record.title),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        let primary = match self.order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };

        primary
            .then_with(|| a.record.title.cmp(&b.record.title))
            .then_with(|| a.id.cmp(&b.id))
    }
}
