use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::category::{Category, Difficulty};
use super::duplicate_key::DuplicateKey;
use super::location::Location;
use super::prize::Prize;
use super::schedule::Schedule;
use super::status::HackathonStatus;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 2000;
pub const MAX_TAGS: usize = 8;
pub const DEFAULT_ORGANIZER: &str = "Unstop";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    #[default]
    Scraped,
    Synthesized,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(from = "TeamSizeFields")]
pub struct TeamSize {
    min: u32,
    max: u32,
}

#[derive(Deserialize)]
struct TeamSizeFields {
    min: u32,
    max: u32,
}

impl From<TeamSizeFields> for TeamSize {
    fn from(fields: TeamSizeFields) -> Self {
        TeamSize::new(fields.min, fields.max)
    }
}

impl TeamSize {
    /// Clamps to `1 <= min <= max`.
    pub fn new(min: u32, max: u32) -> Self {
        let min = min.max(1);
        Self {
            min,
            max: max.max(min),
        }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

impl Default for TeamSize {
    fn default() -> Self {
        Self::new(1, 4)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Links {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
}

impl Links {
    pub fn website(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            website: Some(url.clone()),
            registration: Some(url),
        }
    }
}

/// The document body of a hackathon: everything except identity and audit
/// fields. Scrapers and the synthesizer produce these; the store wraps them
/// in a [`Hackathon`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HackathonRecord {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Description cannot exceed 2000 characters"))]
    pub description: String,

    #[serde(default = "default_organizer")]
    #[validate(length(min = 1, message = "Organizer is required"))]
    pub organizer: String,

    #[serde(default)]
    pub category: Category,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(flatten)]
    pub schedule: Schedule,

    #[serde(default)]
    pub location: Location,

    #[serde(default)]
    pub team_size: TeamSize,

    #[serde(default)]
    pub prizes: Vec<Prize>,

    #[serde(default)]
    #[validate(length(max = 8, message = "At most 8 tags are allowed"))]
    pub tags: Vec<String>,

    #[serde(default)]
    pub status: HackathonStatus,

    #[serde(default)]
    pub links: Links,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub verified: bool,

    #[serde(default)]
    pub source: Source,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scraped_at: Option<DateTime<Utc>>,
}

fn default_organizer() -> String {
    DEFAULT_ORGANIZER.to_string()
}

impl HackathonRecord {
    pub fn new(title: impl Into<String>, schedule: Schedule) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            organizer: default_organizer(),
            category: Category::default(),
            difficulty: Difficulty::default(),
            schedule,
            location: Location::default(),
            team_size: TeamSize::default(),
            prizes: Vec::new(),
            tags: Vec::new(),
            status: HackathonStatus::default(),
            links: Links::default(),
            featured: false,
            verified: false,
            source: Source::default(),
            scraped_at: None,
        }
    }

    /// Trims text fields and applies the length bounds: title and
    /// description are truncated, tags lower-cased, deduplicated and capped.
    pub fn normalized(mut self) -> Self {
        self.title = truncate_chars(self.title.trim(), MAX_TITLE_LEN);
        self.description = truncate_chars(self.description.trim(), MAX_DESCRIPTION_LEN);
        self.organizer = self.organizer.trim().to_string();
        if self.organizer.is_empty() {
            self.organizer = default_organizer();
        }

        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags.iter().map(|t| t.trim().to_lowercase()) {
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags.truncate(MAX_TAGS);
        self.tags = tags;

        self
    }

    pub fn duplicate_key(&self) -> DuplicateKey {
        DuplicateKey::new(&self.title, self.location.venue())
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// A stored hackathon document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hackathon {
    pub id: Uuid,

    #[serde(flatten)]
    pub record: HackathonRecord,

    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hackathon {
    pub fn new(record: HackathonRecord, created_by: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            record,
            created_by: created_by.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn duplicate_key(&self) -> DuplicateKey {
        self.record.duplicate_key()
    }
}

/// Field-level changes staged against a stored hackathon. Only the fields a
/// re-scrape may legitimately change are represented.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HackathonUpdate {
    pub status: Option<HackathonStatus>,
    pub prizes: Option<Vec<Prize>>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub website: Option<String>,
    pub organizer: Option<String>,
}

impl HackathonUpdate {
    pub fn status(status: HackathonStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.prizes.is_none()
            && self.registration_deadline.is_none()
            && self.website.is_none()
            && self.organizer.is_none()
    }

    /// Document field names touched by this update, `updatedAt` excluded.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.status.is_some() {
            fields.push("status");
        }
        if self.prizes.is_some() {
            fields.push("prizes");
        }
        if self.registration_deadline.is_some() {
            fields.push("registrationDeadline");
        }
        if self.website.is_some() {
            fields.push("links.website");
        }
        if self.organizer.is_some() {
            fields.push("organizer");
        }
        fields
    }

    pub fn apply(&self, hackathon: &mut Hackathon, now: DateTime<Utc>) {
        let record = &mut hackathon.record;

        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(prizes) = &self.prizes {
            record.prizes = prizes.clone();
        }
        if let Some(deadline) = self.registration_deadline {
            record.schedule = record.schedule.with_registration_deadline(deadline);
        }
        if let Some(website) = &self.website {
            record.links = Links::website(website.clone());
        }
        if let Some(organizer) = &self.organizer {
            record.organizer = organizer.clone();
        }

        hackathon.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::location::Address;
    use chrono::{Duration, TimeZone};

    fn schedule() -> Schedule {
        let start = Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap();
        Schedule::clamped(start - Duration::days(3), start, start + Duration::days(2))
    }

    #[test]
    fn test_normalized_applies_bounds() {
        let mut record = HackathonRecord::new(format!("  {}  ", "x".repeat(250)), schedule());
        record.description = "d".repeat(2500);
        record.organizer = "   ".to_string();
        record.tags = vec![
            "AI".into(),
            "ai".into(),
            " ".into(),
            "one".into(),
            "two".into(),
            "three".into(),
            "four".into(),
            "five".into(),
            "six".into(),
            "seven".into(),
        ];

        let record = record.normalized();
        assert_eq!(record.title.chars().count(), MAX_TITLE_LEN);
        assert_eq!(record.description.chars().count(), MAX_DESCRIPTION_LEN);
        assert_eq!(record.organizer, "Unstop");
        assert_eq!(record.tags.len(), MAX_TAGS);
        assert_eq!(record.tags[0], "ai");
        assert_eq!(record.tags[1], "one");
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_empty_title_fails_validation() {
        let record = HackathonRecord::new("   ", schedule()).normalized();
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_document_round_trip_keeps_flat_shape() {
        let mut record = HackathonRecord::new("AI Hack", schedule());
        record.location = Location::offline("Pune", Address::city("Pune", "Maharashtra", "India"));
        record.prizes = vec![Prize::new("1st", 1000)];
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let hackathon = Hackathon::new(record, "importer", now);

        let value = serde_json::to_value(&hackathon).unwrap();
        assert_eq!(value["title"], "AI Hack");
        assert!(value.get("registrationDeadline").is_some());
        assert_eq!(value["location"]["type"], "offline");
        assert_eq!(value["teamSize"]["max"], 4);
        assert_eq!(value["createdBy"], "importer");

        let back: Hackathon = serde_json::from_value(value).unwrap();
        assert_eq!(back, hackathon);
    }

    #[test]
    fn test_team_size_deserialization_clamps() {
        let size: TeamSize = serde_json::from_str(r#"{"min":4,"max":2}"#).unwrap();
        assert_eq!((size.min(), size.max()), (4, 4));
    }

    #[test]
    fn test_update_apply_touches_only_staged_fields() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut hackathon = Hackathon::new(HackathonRecord::new("AI Hack", schedule()), "importer", now);
        let before = hackathon.clone();

        let update = HackathonUpdate {
            prizes: Some(vec![Prize::new("1st", 5000)]),
            ..HackathonUpdate::default()
        };
        let later = now + Duration::hours(1);
        update.apply(&mut hackathon, later);

        assert_eq!(update.changed_fields(), vec!["prizes"]);
        assert_eq!(hackathon.record.prizes, vec![Prize::new("1st", 5000)]);
        assert_eq!(hackathon.updated_at, later);
        assert_eq!(hackathon.record.organizer, before.record.organizer);
        assert_eq!(hackathon.record.schedule, before.record.schedule);
        assert_eq!(hackathon.created_at, before.created_at);
    }

    #[test]
    fn test_update_deadline_is_clamped_to_start() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut hackathon = Hackathon::new(HackathonRecord::new("AI Hack", schedule()), "importer", now);
        let start = hackathon.record.schedule.start_date();

        let update = HackathonUpdate {
            registration_deadline: Some(start + Duration::days(5)),
            ..HackathonUpdate::default()
        };
        update.apply(&mut hackathon, now);

        assert_eq!(
            hackathon.record.schedule.registration_deadline(),
            start - Duration::days(1)
        );
    }

    #[test]
    fn test_update_website_moves_registration_link_too() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut record = HackathonRecord::new("AI Hack", schedule());
        record.links = Links::website("https://unstop.com/hackathons/old");
        let mut hackathon = Hackathon::new(record, "importer", now);

        let update = HackathonUpdate {
            website: Some("https://unstop.com/hackathons/new".to_string()),
            ..HackathonUpdate::default()
        };
        update.apply(&mut hackathon, now);

        assert_eq!(hackathon.record.links, Links::website("https://unstop.com/hackathons/new"));
        assert_eq!(
            hackathon.record.links.registration.as_deref(),
            Some("https://unstop.com/hackathons/new")
        );
    }
}
