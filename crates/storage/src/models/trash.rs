use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::hackathon::Hackathon;
use super::status::HackathonStatus;

pub const DEFAULT_TRASH_RETENTION_DAYS: i64 = 7;

/// A hackathon moved out of the primary collection, kept until
/// `auto_delete_after`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrashedHackathon {
    #[serde(flatten)]
    pub hackathon: Hackathon,
    pub deleted_at: DateTime<Utc>,
    pub auto_delete_after: DateTime<Utc>,
}

impl TrashedHackathon {
    pub fn new(mut hackathon: Hackathon, now: DateTime<Utc>, retention: Duration) -> Self {
        hackathon.record.status = HackathonStatus::Trashed;
        Self {
            hackathon,
            deleted_at: now,
            auto_delete_after: now + retention,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.auto_delete_after < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HackathonRecord, Schedule};
    use chrono::TimeZone;

    #[test]
    fn test_trash_entry_expires_after_retention() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let schedule = Schedule::clamped(now, now + Duration::days(1), now + Duration::days(2));
        let hackathon = Hackathon::new(HackathonRecord::new("AI Hack", schedule), "importer", now);

        let trashed = TrashedHackathon::new(hackathon, now, Duration::days(7));
        assert_eq!(trashed.hackathon.record.status, HackathonStatus::Trashed);
        assert_eq!(trashed.auto_delete_after, now + Duration::days(7));
        assert!(!trashed.is_expired(now + Duration::days(7)));
        assert!(trashed.is_expired(now + Duration::days(7) + Duration::seconds(1)));
    }
}
