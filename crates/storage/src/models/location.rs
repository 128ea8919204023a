use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const ONLINE_VENUE: &str = "Online";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

impl Address {
    pub fn city(city: impl Into<String>, state: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            state: Some(state.into()),
            country: Some(country.into()),
            ..Self::default()
        }
    }
}

/// Where a hackathon takes place. Physical variants always carry a venue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Location {
    #[default]
    Online,
    Offline {
        venue: String,
        #[serde(default)]
        address: Address,
    },
    Hybrid {
        venue: String,
        #[serde(default)]
        address: Address,
    },
}

impl Location {
    pub fn offline(venue: impl Into<String>, address: Address) -> Self {
        Location::Offline {
            venue: venue.into(),
            address,
        }
    }

    pub fn hybrid(venue: impl Into<String>, address: Address) -> Self {
        Location::Hybrid {
            venue: venue.into(),
            address,
        }
    }

    /// Venue used for duplicate matching; online events share one venue.
    pub fn venue(&self) -> &str {
        match self {
            Location::Online => ONLINE_VENUE,
            Location::Offline { venue, .. } | Location::Hybrid { venue, .. } => venue,
        }
    }

    pub fn address(&self) -> Option<&Address> {
        match self {
            Location::Online => None,
            Location::Offline { address, .. } | Location::Hybrid { address, .. } => Some(address),
        }
    }

    pub fn kind(&self) -> LocationKind {
        match self {
            Location::Online => LocationKind::Online,
            Location::Offline { .. } => LocationKind::Offline,
            Location::Hybrid { .. } => LocationKind::Hybrid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Online,
    Offline,
    Hybrid,
}

impl LocationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationKind::Online => "online",
            LocationKind::Offline => "offline",
            LocationKind::Hybrid => "hybrid",
        }
    }
}
