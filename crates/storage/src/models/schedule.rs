use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::status::HackathonStatus;

/// The three dates of a hackathon, always ordered as
/// `registration_deadline <= start_date < end_date`.
///
/// Out-of-order input is clamped rather than rejected: a deadline after the
/// start moves to the day before the start, and an end that does not follow
/// the start moves to two days after it. Deserialization goes through the
/// same path, so stored documents cannot break the ordering either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(from = "ScheduleFields", rename_all = "camelCase")]
pub struct Schedule {
    registration_deadline: DateTime<Utc>,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleFields {
    registration_deadline: Option<DateTime<Utc>>,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
}

impl From<ScheduleFields> for Schedule {
    fn from(fields: ScheduleFields) -> Self {
        Schedule::clamped(
            fields.registration_deadline.unwrap_or(fields.start_date),
            fields.start_date,
            fields.end_date,
        )
    }
}

impl Schedule {
    pub fn clamped(
        registration_deadline: DateTime<Utc>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        let registration_deadline = if registration_deadline > start_date {
            start_date - Duration::days(1)
        } else {
            registration_deadline
        };

        let end_date = if end_date <= start_date {
            start_date + Duration::days(2)
        } else {
            end_date
        };

        Self {
            registration_deadline,
            start_date,
            end_date,
        }
    }

    pub fn registration_deadline(&self) -> DateTime<Utc> {
        self.registration_deadline
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }

    /// Same start and end with a new deadline, clamped against the start.
    pub fn with_registration_deadline(&self, registration_deadline: DateTime<Utc>) -> Self {
        Self::clamped(registration_deadline, self.start_date, self.end_date)
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> HackathonStatus {
        HackathonStatus::derive(
            self.registration_deadline,
            self.start_date,
            self.end_date,
            now,
        )
    }
}
