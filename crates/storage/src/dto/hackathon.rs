use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::PaginationParams;
use crate::models::prize::{DEFAULT_CURRENCY, total_amount};
use crate::models::{
    Category, Difficulty, Hackathon, HackathonRecord, HackathonStatus, Links, Location,
    LocationKind, Prize, Schedule, Source, TeamSize,
};
use crate::store::{HackathonFilter, HackathonSort, SortField, SortOrder};

const MAX_SEARCH_LEN: usize = 100;
const DEFAULT_UPCOMING_LIMIT: u32 = 10;
const MAX_UPCOMING_LIMIT: u32 = 50;
pub const FEATURED_LIMIT: u32 = 6;

/// Query string of `GET /api/hackathons`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HackathonQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
    pub status: Option<HackathonStatus>,
    pub location: Option<LocationKind>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    #[serde(alias = "sortBy")]
    pub sort_by: Option<SortField>,
    #[serde(alias = "sortOrder")]
    pub sort_order: Option<SortOrder>,
}

impl HackathonQuery {
    pub fn pagination(&self) -> PaginationParams {
        let defaults = PaginationParams::default();
        PaginationParams {
            page: self.page.unwrap_or(defaults.page),
            page_size: self.page_size.unwrap_or(defaults.page_size),
        }
    }

    pub fn filter(&self) -> HackathonFilter {
        HackathonFilter {
            category: self.category,
            difficulty: self.difficulty,
            status: self.status,
            location: self.location,
            featured: self.featured,
            search: self.search.clone(),
        }
    }

    pub fn sort(&self) -> HackathonSort {
        HackathonSort::new(
            self.sort_by.unwrap_or_default(),
            self.sort_order.unwrap_or_default(),
        )
    }

    pub fn validate(&self) -> Result<(), String> {
        self.pagination().validate()?;

        if let Some(search) = &self.search {
            if search.chars().count() > MAX_SEARCH_LEN {
                return Err(format!("search cannot exceed {} characters", MAX_SEARCH_LEN));
            }
        }

        if self.status == Some(HackathonStatus::Trashed) {
            return Err("trashed hackathons are listed under /api/trash".to_string());
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpcomingQuery {
    #[serde(default = "default_upcoming_limit")]
    pub limit: u32,
}

fn default_upcoming_limit() -> u32 {
    DEFAULT_UPCOMING_LIMIT
}

impl UpcomingQuery {
    pub fn validate(&self) -> Result<(), String> {
        if self.limit < 1 || self.limit > MAX_UPCOMING_LIMIT {
            return Err(format!("limit must be between 1 and {}", MAX_UPCOMING_LIMIT));
        }
        Ok(())
    }
}

/// Request payload for adding a hackathon by hand
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHackathonRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Description cannot exceed 2000 characters"))]
    pub description: String,

    #[validate(length(min = 1, max = 200))]
    pub organizer: Option<String>,

    #[serde(default)]
    pub category: Category,

    #[serde(default)]
    pub difficulty: Difficulty,

    pub registration_deadline: Option<DateTime<Utc>>,

    pub start_date: DateTime<Utc>,

    pub end_date: DateTime<Utc>,

    #[serde(default)]
    pub location: Location,

    #[serde(default)]
    pub team_size: TeamSize,

    #[serde(default)]
    pub prizes: Vec<Prize>,

    #[serde(default)]
    #[validate(length(max = 8, message = "At most 8 tags are allowed"))]
    pub tags: Vec<String>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub website: Option<String>,

    #[serde(default)]
    pub featured: bool,
}

impl CreateHackathonRequest {
    /// A missing deadline defaults to the start date.
    pub fn validate_dates(&self) -> Result<(), String> {
        check_dates(
            self.registration_deadline.unwrap_or(self.start_date),
            self.start_date,
            self.end_date,
        )
    }

    /// Record with `source = manual` and the status derived at `now`.
    pub fn into_record(self, now: DateTime<Utc>) -> HackathonRecord {
        let schedule = Schedule::clamped(
            self.registration_deadline.unwrap_or(self.start_date),
            self.start_date,
            self.end_date,
        );

        let mut record = HackathonRecord::new(self.title, schedule);
        record.description = self.description;
        if let Some(organizer) = self.organizer {
            record.organizer = organizer;
        }
        record.category = self.category;
        record.difficulty = self.difficulty;
        record.location = self.location;
        record.team_size = self.team_size;
        record.prizes = self.prizes;
        record.tags = self.tags;
        record.links = self.website.map(Links::website).unwrap_or_default();
        record.featured = self.featured;
        record.source = Source::Manual;
        record.status = schedule.status_at(now);

        record.normalized()
    }
}

/// Request payload for editing a stored hackathon; absent fields are kept
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHackathonRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub organizer: Option<String>,

    pub category: Option<Category>,

    pub difficulty: Option<Difficulty>,

    pub registration_deadline: Option<DateTime<Utc>>,

    pub start_date: Option<DateTime<Utc>>,

    pub end_date: Option<DateTime<Utc>>,

    pub location: Option<Location>,

    pub team_size: Option<TeamSize>,

    pub prizes: Option<Vec<Prize>>,

    #[validate(length(max = 8))]
    pub tags: Option<Vec<String>>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub website: Option<String>,

    pub featured: Option<bool>,

    pub verified: Option<bool>,
}

impl UpdateHackathonRequest {
    /// Merges the request into `hackathon`, re-deriving its status at `now`.
    /// Dates are checked after merging, so a lone `startDate` cannot end up
    /// after the stored end.
    pub fn apply(&self, hackathon: &mut Hackathon, now: DateTime<Utc>) -> Result<(), String> {
        let stored = hackathon.record.schedule;
        let start_date = self.start_date.unwrap_or(stored.start_date());
        let end_date = self.end_date.unwrap_or(stored.end_date());
        let registration_deadline = self
            .registration_deadline
            .unwrap_or(stored.registration_deadline());
        check_dates(registration_deadline, start_date, end_date)?;

        let record = &mut hackathon.record;
        if let Some(title) = &self.title {
            record.title = title.clone();
        }
        if let Some(description) = &self.description {
            record.description = description.clone();
        }
        if let Some(organizer) = &self.organizer {
            record.organizer = organizer.clone();
        }
        if let Some(category) = self.category {
            record.category = category;
        }
        if let Some(difficulty) = self.difficulty {
            record.difficulty = difficulty;
        }
        if let Some(location) = &self.location {
            record.location = location.clone();
        }
        if let Some(team_size) = self.team_size {
            record.team_size = team_size;
        }
        if let Some(prizes) = &self.prizes {
            record.prizes = prizes.clone();
        }
        if let Some(tags) = &self.tags {
            record.tags = tags.clone();
        }
        if let Some(website) = &self.website {
            record.links = Links::website(website.clone());
        }
        if let Some(featured) = self.featured {
            record.featured = featured;
        }
        if let Some(verified) = self.verified {
            record.verified = verified;
        }

        record.schedule = Schedule::clamped(registration_deadline, start_date, end_date);
        record.status = record.schedule.status_at(now);
        hackathon.record = hackathon.record.clone().normalized();
        hackathon.updated_at = now;

        Ok(())
    }
}

fn check_dates(
    registration_deadline: DateTime<Utc>,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<(), String> {
    if end_date <= start_date {
        return Err("endDate must be after startDate".to_string());
    }
    if registration_deadline > start_date {
        return Err("registrationDeadline cannot be after startDate".to_string());
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusCount {
    pub status: HackathonStatus,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryCount {
    pub category: Category,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HackathonStats {
    pub total: i64,
    pub by_status: Vec<StatusCount>,
    pub by_category: Vec<CategoryCount>,
}

impl HackathonStats {
    pub fn new(by_status: Vec<(HackathonStatus, i64)>, by_category: Vec<(Category, i64)>) -> Self {
        Self {
            total: by_status.iter().map(|(_, count)| count).sum(),
            by_status: by_status
                .into_iter()
                .map(|(status, count)| StatusCount { status, count })
                .collect(),
            by_category: by_category
                .into_iter()
                .map(|(category, count)| CategoryCount { category, count })
                .collect(),
        }
    }
}

/// Flat view written to the simplified JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HackathonSummary {
    pub title: String,
    pub organizer: String,
    pub registration_deadline: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub venue: String,
    pub total_prize: i64,
    pub currency: String,
    pub url: Option<String>,
    pub status: HackathonStatus,
}

impl From<&HackathonRecord> for HackathonSummary {
    fn from(record: &HackathonRecord) -> Self {
        Self {
            title: record.title.clone(),
            organizer: record.organizer.clone(),
            registration_deadline: record.schedule.registration_deadline(),
            start_date: record.schedule.start_date(),
            end_date: record.schedule.end_date(),
            venue: record.location.venue().to_string(),
            total_prize: total_amount(&record.prizes),
            currency: record
                .prizes
                .first()
                .map(|p| p.currency.clone())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            url: record.links.website.clone(),
            status: record.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub id: Uuid,
    pub status: HackathonStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PurgeResponse {
    pub purged: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn create_request() -> CreateHackathonRequest {
        serde_json::from_value(serde_json::json!({
            "title": "  Campus Build Night ",
            "startDate": "2025-06-20T09:00:00Z",
            "endDate": "2025-06-21T18:00:00Z",
            "registrationDeadline": "2025-06-15T00:00:00Z",
            "category": "Web Development",
            "location": { "type": "offline", "venue": "Pune" },
            "website": "https://example.org/build-night",
            "tags": ["Web", "web"]
        }))
        .unwrap()
    }

    #[test]
    fn test_query_defaults_and_filter() {
        let query = HackathonQuery {
            category: Some(Category::Blockchain),
            search: Some("chain".into()),
            ..HackathonQuery::default()
        };
        assert!(query.validate().is_ok());
        assert_eq!(query.pagination().page, 1);
        assert_eq!(query.pagination().page_size, 20);

        let filter = query.filter();
        assert_eq!(filter.category, Some(Category::Blockchain));
        assert_eq!(filter.search.as_deref(), Some("chain"));
    }

    #[test]
    fn test_query_sort_accepts_both_spellings() {
        let query: HackathonQuery = serde_json::from_value(serde_json::json!({
            "sortBy": "title",
            "sort_order": "desc"
        }))
        .unwrap();
        assert_eq!(query.sort(), HackathonSort::new(SortField::Title, SortOrder::Desc));
        assert_eq!(HackathonQuery::default().sort(), HackathonSort::default());
    }

    #[test]
    fn test_create_request_builds_manual_record() {
        let request = create_request();
        assert!(request.validate().is_ok());
        assert!(request.validate_dates().is_ok());

        let record = request.into_record(now());
        assert_eq!(record.title, "Campus Build Night");
        assert_eq!(record.source, Source::Manual);
        assert_eq!(record.status, HackathonStatus::Upcoming);
        assert_eq!(record.category, Category::WebDevelopment);
        assert_eq!(record.location.venue(), "Pune");
        assert_eq!(record.tags, vec!["web"]);
        assert_eq!(
            record.links.registration.as_deref(),
            Some("https://example.org/build-night")
        );
    }

    #[test]
    fn test_create_request_rejects_bad_input() {
        let mut request = create_request();
        request.title = String::new();
        request.website = Some("not a url".to_string());
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(errors.field_errors().contains_key("website"));

        let mut request = create_request();
        request.end_date = request.start_date;
        assert!(request.validate_dates().is_err());

        let mut request = create_request();
        request.registration_deadline = Some(request.start_date + Duration::days(1));
        assert!(request.validate_dates().is_err());
    }

    #[test]
    fn test_update_request_merges_and_rederives_status() {
        let mut hackathon = Hackathon::new(create_request().into_record(now()), "api", now());
        let created = hackathon.clone();
        let later = now() + Duration::days(1);

        let update = UpdateHackathonRequest {
            registration_deadline: Some(now() + Duration::hours(12)),
            website: Some("https://example.org/v2".to_string()),
            featured: Some(true),
            ..UpdateHackathonRequest::default()
        };
        update.apply(&mut hackathon, later).unwrap();

        assert_eq!(hackathon.record.title, created.record.title);
        assert!(hackathon.record.featured);
        assert_eq!(hackathon.record.status, HackathonStatus::RegistrationClosed);
        assert_eq!(hackathon.record.links, Links::website("https://example.org/v2"));
        assert_eq!(hackathon.updated_at, later);
        assert_eq!(hackathon.created_at, created.created_at);
    }

    #[test]
    fn test_update_request_checks_merged_dates() {
        let mut hackathon = Hackathon::new(create_request().into_record(now()), "api", now());
        let before = hackathon.clone();

        let update = UpdateHackathonRequest {
            start_date: Some(hackathon.record.schedule.end_date() + Duration::days(1)),
            ..UpdateHackathonRequest::default()
        };
        assert!(update.apply(&mut hackathon, now()).is_err());
        assert_eq!(hackathon, before);
    }

    #[test]
    fn test_query_rejects_large_page_and_trash_status() {
        let query = HackathonQuery {
            page_size: Some(500),
            ..HackathonQuery::default()
        };
        assert!(query.validate().is_err());

        let query = HackathonQuery {
            status: Some(HackathonStatus::Trashed),
            ..HackathonQuery::default()
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_stats_total_sums_statuses() {
        let stats = HackathonStats::new(
            vec![(HackathonStatus::Upcoming, 3), (HackathonStatus::Ongoing, 2)],
            vec![(Category::AiMl, 5)],
        );
        assert_eq!(stats.total, 5);
        assert_eq!(stats.by_status.len(), 2);
    }

    #[test]
    fn test_summary_totals_prizes() {
        let start = Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap();
        let schedule = Schedule::clamped(start, start, start + Duration::days(2));
        let mut record = HackathonRecord::new("AI Hack", schedule);
        record.prizes = vec![Prize::new("1st", 500), Prize::new("2nd", 300)];
        record.links = Links::website("https://unstop.com/hackathons/ai-hack");

        let summary = HackathonSummary::from(&record);
        assert_eq!(summary.total_prize, 800);
        assert_eq!(summary.currency, "INR");
        assert_eq!(summary.venue, "Online");
        assert_eq!(summary.url.as_deref(), Some("https://unstop.com/hackathons/ai-hack"));
    }
}
