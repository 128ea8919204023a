use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{
    Category, DuplicateKey, Hackathon, HackathonStatus, HackathonUpdate, TrashedHackathon,
};
use crate::store::{HackathonFilter, HackathonSort, HackathonStore, SortField, SortOrder};

/// Repository for hackathon documents stored as JSONB in PostgreSQL.
///
/// The `document` column holds the whole record; `title`, `venue`, `status`,
/// `category` and the dates are projected next to it for indexed lookups and
/// rewritten on every write.
#[derive(Clone)]
pub struct HackathonRepository {
    pool: PgPool,
}

impl HackathonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Rewrites document and projected columns; returns the rows touched.
    async fn write_back<'e, E>(executor: E, hackathon: &Hackathon) -> Result<u64>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let record = &hackathon.record;
        let result = sqlx::query(
            r#"
            UPDATE hackathons
            SET title = $2, venue = $3, status = $4, category = $5,
                start_date = $6, registration_deadline = $7,
                document = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(hackathon.id)
        .bind(&record.title)
        .bind(record.location.venue().trim())
        .bind(record.status.as_str())
        .bind(record.category.as_str())
        .bind(record.schedule.start_date())
        .bind(record.schedule.registration_deadline())
        .bind(Json(hackathon))
        .bind(hackathon.updated_at)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &HackathonFilter) {
    builder.push(" WHERE status <> ");
    builder.push_bind(HackathonStatus::Trashed.as_str());

    if let Some(category) = filter.category {
        builder.push(" AND category = ").push_bind(category.as_str());
    }
    if let Some(difficulty) = filter.difficulty {
        builder
            .push(" AND document->>'difficulty' = ")
            .push_bind(difficulty.as_str());
    }
    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(location) = filter.location {
        builder
            .push(" AND document->'location'->>'type' = ")
            .push_bind(location.as_str());
    }
    if let Some(featured) = filter.featured {
        builder
            .push(" AND COALESCE((document->>'featured')::boolean, false) = ")
            .push_bind(featured);
    }
    if let Some(term) = filter.search_term() {
        let pattern = format!("%{}%", escape_like(&term));
        builder
            .push(" AND (lower(title) LIKE ")
            .push_bind(pattern.clone())
            .push(" OR lower(document->>'organizer') LIKE ")
            .push_bind(pattern.clone())
            .push(" OR lower(document->>'description') LIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

fn push_order(builder: &mut QueryBuilder<'_, Postgres>, sort: HackathonSort) {
    let column = match sort.field {
        SortField::StartDate => "start_date",
        SortField::RegistrationDeadline => "registration_deadline",
        SortField::Title => "title",
        SortField::CreatedAt => "created_at",
    };
    let direction = match sort.order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    builder
        .push(" ORDER BY ")
        .push(column)
        .push(" ")
        .push(direction)
        .push(", title ASC, id ASC");
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl HackathonStore for HackathonRepository {
    async fn find_duplicate(&self, key: &DuplicateKey) -> Result<Option<Hackathon>> {
        let row: Option<(Json<Hackathon>,)> = sqlx::query_as(
            r#"
            SELECT document
            FROM hackathons
            WHERE lower(title) = lower($1) AND lower(venue) = lower($2) AND status <> $3
            LIMIT 1
            "#,
        )
        .bind(key.title())
        .bind(key.venue())
        .bind(HackathonStatus::Trashed.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(Json(hackathon),)| hackathon))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Hackathon> {
        let (Json(hackathon),): (Json<Hackathon>,) =
            sqlx::query_as("SELECT document FROM hackathons WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(StorageError::NotFound)?;

        Ok(hackathon)
    }

    async fn insert(&self, hackathon: &Hackathon) -> Result<()> {
        let record = &hackathon.record;
        sqlx::query(
            r#"
            INSERT INTO hackathons (
                id, title, venue, status, category, start_date,
                registration_deadline, document, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(hackathon.id)
        .bind(&record.title)
        .bind(record.location.venue().trim())
        .bind(record.status.as_str())
        .bind(record.category.as_str())
        .bind(record.schedule.start_date())
        .bind(record.schedule.registration_deadline())
        .bind(Json(hackathon))
        .bind(hackathon.created_at)
        .bind(hackathon.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let err = StorageError::from(e);
            if err.is_unique_violation() {
                StorageError::ConstraintViolation(format!(
                    "Hackathon {} already exists",
                    hackathon.id
                ))
            } else {
                err
            }
        })?;

        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        update: &HackathonUpdate,
        now: DateTime<Utc>,
    ) -> Result<Hackathon> {
        let mut tx = self.pool.begin().await?;

        let (Json(mut hackathon),): (Json<Hackathon>,) =
            sqlx::query_as("SELECT document FROM hackathons WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(StorageError::NotFound)?;

        update.apply(&mut hackathon, now);
        Self::write_back(&mut *tx, &hackathon).await?;
        tx.commit().await?;

        Ok(hackathon)
    }

    async fn replace(&self, hackathon: &Hackathon) -> Result<()> {
        let rows = Self::write_back(&self.pool, hackathon).await?;
        if rows == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM hackathons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Hackathon>> {
        let rows: Vec<(Json<Hackathon>,)> =
            sqlx::query_as("SELECT document FROM hackathons ORDER BY start_date ASC, title ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(Json(h),)| h).collect())
    }

    async fn search(
        &self,
        filter: &HackathonFilter,
        sort: HackathonSort,
        offset: u32,
        limit: u32,
    ) -> Result<(Vec<Hackathon>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM hackathons");
        push_filter(&mut count, filter);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut page = QueryBuilder::<Postgres>::new("SELECT document FROM hackathons");
        push_filter(&mut page, filter);
        push_order(&mut page, sort);
        page.push(" LIMIT ")
            .push_bind(i64::from(limit))
            .push(" OFFSET ")
            .push_bind(i64::from(offset));

        let rows: Vec<(Json<Hackathon>,)> = page.build_query_as().fetch_all(&self.pool).await?;

        Ok((rows.into_iter().map(|(Json(h),)| h).collect(), total))
    }

    async fn insert_trash(&self, entry: &TrashedHackathon) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO hackathons_trash (id, title, document, deleted_at, auto_delete_after)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET title = EXCLUDED.title,
                document = EXCLUDED.document,
                deleted_at = EXCLUDED.deleted_at,
                auto_delete_after = EXCLUDED.auto_delete_after
            "#,
        )
        .bind(entry.hackathon.id)
        .bind(&entry.hackathon.record.title)
        .bind(Json(entry))
        .bind(entry.deleted_at)
        .bind(entry.auto_delete_after)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_trash(&self) -> Result<Vec<TrashedHackathon>> {
        let rows: Vec<(Json<TrashedHackathon>,)> =
            sqlx::query_as("SELECT document FROM hackathons_trash ORDER BY deleted_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(Json(entry),)| entry).collect())
    }

    async fn purge_trash(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM hackathons_trash WHERE auto_delete_after < $1")
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn count_by_status(&self) -> Result<Vec<(HackathonStatus, i64)>> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM hackathons GROUP BY status")
                .fetch_all(&self.pool)
                .await?;

        let mut counts: Vec<(HackathonStatus, i64)> = rows
            .into_iter()
            .filter_map(|(status, count)| match status.parse() {
                Ok(status) => Some((status, count)),
                Err(e) => {
                    tracing::warn!("Skipping unknown status in breakdown: {}", e);
                    None
                }
            })
            .collect();
        counts.sort();
        Ok(counts)
    }

    async fn count_by_category(&self) -> Result<Vec<(Category, i64)>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT category, COUNT(*) FROM hackathons GROUP BY category ORDER BY category",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(category, count)| match category.parse() {
                Ok(category) => Some((category, count)),
                Err(e) => {
                    tracing::warn!("Skipping unknown category in breakdown: {}", e);
                    None
                }
            })
            .collect())
    }
}
