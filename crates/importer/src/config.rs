use std::ops::Range;
use std::path::PathBuf;
use std::time::Duration;

use storage::services::TrashPolicy;
use url::Url;

pub const UNSTOP_BASE_URL: &str = "https://unstop.com";
pub const LISTING_PATH: &str = "/hackathons";
pub const LISTING_QUERY: [(&str, &str); 6] = [
    ("oppstatus", "open"),
    ("domain", "2"),
    ("course", "6"),
    ("specialization", "Information Technology"),
    ("usertype", "students"),
    ("passingOutYear", "2027"),
];

pub const DEFAULT_CARD_LIMIT: usize = 20;
pub const DEFAULT_OUTPUT_PATH: &str = "data/hackathons_dynamic.json";
pub const DEFAULT_SIMPLE_OUTPUT_PATH: &str = "data/hackathons_simple.json";
pub const DEFAULT_ACTOR: &str = "system:importer";
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Random pauses, in seconds, drawn before the page request and between cards.
#[derive(Debug, Clone, PartialEq)]
pub struct Pacing {
    pub request: Range<f64>,
    pub card: Range<f64>,
}

impl Pacing {
    pub fn none() -> Self {
        Self {
            request: 0.0..0.0,
            card: 0.0..0.0,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            request: 1.0..3.0,
            card: 0.5..1.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub card_limit: usize,
    pub pacing: Pacing,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: UNSTOP_BASE_URL.to_string(),
            card_limit: DEFAULT_CARD_LIMIT,
            pacing: Pacing::default(),
            user_agent: BROWSER_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ScrapeConfig {
    pub fn listing_url(&self) -> crate::Result<Url> {
        let base = Url::parse(&self.base_url)?.join(LISTING_PATH)?;
        Ok(Url::parse_with_params(base.as_str(), LISTING_QUERY)?)
    }
}

#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub input: PathBuf,
    pub trash: TrashPolicy,
    /// Recorded as `createdBy` on inserted documents.
    pub actor: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_OUTPUT_PATH),
            trash: TrashPolicy::default(),
            actor: DEFAULT_ACTOR.to_string(),
        }
    }
}
