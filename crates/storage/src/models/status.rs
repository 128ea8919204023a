use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Lifecycle state of a hackathon.
///
/// Variants are declared in lifecycle order, so `Ord` follows the direction a
/// record moves in as time passes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum HackathonStatus {
    #[default]
    Upcoming,
    Ongoing,
    RegistrationClosed,
    Completed,
    Trashed,
}

impl HackathonStatus {
    pub const ALL: [HackathonStatus; 5] = [
        HackathonStatus::Upcoming,
        HackathonStatus::Ongoing,
        HackathonStatus::RegistrationClosed,
        HackathonStatus::Completed,
        HackathonStatus::Trashed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HackathonStatus::Upcoming => "upcoming",
            HackathonStatus::Ongoing => "ongoing",
            HackathonStatus::RegistrationClosed => "registration_closed",
            HackathonStatus::Completed => "completed",
            HackathonStatus::Trashed => "trashed",
        }
    }

    /// Derives the status from the three schedule dates at instant `now`.
    ///
    /// The deadline check runs first, so once registration closes the record
    /// stays `RegistrationClosed` even while the event itself is running.
    /// Never returns `Trashed`.
    pub fn derive(
        registration_deadline: DateTime<Utc>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        if now > registration_deadline {
            HackathonStatus::RegistrationClosed
        } else if start_date <= now && now <= end_date {
            HackathonStatus::Ongoing
        } else if now < start_date {
            HackathonStatus::Upcoming
        } else {
            HackathonStatus::Completed
        }
    }
}

impl fmt::Display for HackathonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HackathonStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HackathonStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown status: {}", s))
    }
}
