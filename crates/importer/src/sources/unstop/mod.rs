mod client;
mod extractor;
mod patterns;
mod selectors;

pub use client::HttpFetcher;
pub use extractor::{CardExtractor, FoundDates, UNKNOWN_ORGANIZER};
pub use patterns::{clean_text, days_left, find_dates, find_prize_amounts};
pub use selectors::{CardFields, CardSnapshot, CssField, css_chain, parse_listing};

use chrono::{DateTime, Utc};
use rand::Rng;
use std::ops::Range;
use std::time::Duration;
use storage::models::{HackathonRecord, Source};
use tracing::{info, warn};
use url::Url;

use crate::config::ScrapeConfig;
use crate::synthesizer::Synthesizer;
use crate::traits::PageFetcher;
use crate::Result;

/// What a scrape run produced and where it came from.
#[derive(Debug, Clone)]
pub struct ScrapeReport {
    pub records: Vec<HackathonRecord>,
    pub source: Source,
    pub cards_found: usize,
    pub cards_failed: usize,
}

/// Scrapes the Unstop hackathon listing, falling back to synthesized data
/// whenever the page cannot be fetched or yields no usable cards.
pub struct UnstopScraper<F> {
    fetcher: F,
    fields: CardFields,
    extractor: CardExtractor,
    synthesizer: Synthesizer,
    config: ScrapeConfig,
    listing_url: Url,
}

impl<F: PageFetcher> UnstopScraper<F> {
    pub fn new(fetcher: F, synthesizer: Synthesizer, config: ScrapeConfig) -> Result<Self> {
        let listing_url = config.listing_url()?;
        let base_url = Url::parse(&config.base_url)?;

        Ok(Self {
            fetcher,
            fields: CardFields::default(),
            extractor: CardExtractor::new(base_url),
            synthesizer,
            config,
            listing_url,
        })
    }

    pub fn with_fields(mut self, fields: CardFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn listing_url(&self) -> &Url {
        &self.listing_url
    }

    pub async fn scrape<R: Rng + ?Sized>(&self, now: DateTime<Utc>, rng: &mut R) -> ScrapeReport {
        info!("Scraping hackathons from: {}", self.listing_url);
        pause(&self.config.pacing.request, rng).await;

        let html = match self.fetcher.fetch(self.listing_url.as_str()).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Failed to fetch listing, generating hackathons instead: {}", e);
                return self.synthesize(now, rng, 0, 0);
            }
        };

        let cards = parse_listing(&html, &self.fields, self.config.card_limit);
        if cards.is_empty() {
            warn!("No cards found on listing page, generating hackathons instead");
            return self.synthesize(now, rng, 0, 0);
        }

        let cards_found = cards.len();
        let mut cards_failed = 0;
        let mut records = Vec::with_capacity(cards_found);

        for (idx, card) in cards.iter().enumerate() {
            match self.extractor.extract(card, now, rng) {
                Ok(record) => {
                    info!("Extracted: {}", record.title);
                    records.push(record);
                }
                Err(e) => {
                    warn!("Skipping card {}: {}", idx, e);
                    cards_failed += 1;
                }
            }
            pause(&self.config.pacing.card, rng).await;
        }

        if records.is_empty() {
            warn!("No hackathons extracted, generating hackathons instead");
            return self.synthesize(now, rng, cards_found, cards_failed);
        }

        info!("Successfully extracted {} hackathons", records.len());
        ScrapeReport {
            records,
            source: Source::Scraped,
            cards_found,
            cards_failed,
        }
    }

    fn synthesize<R: Rng + ?Sized>(
        &self,
        now: DateTime<Utc>,
        rng: &mut R,
        cards_found: usize,
        cards_failed: usize,
    ) -> ScrapeReport {
        ScrapeReport {
            records: self.synthesizer.generate(now, rng),
            source: Source::Synthesized,
            cards_found,
            cards_failed,
        }
    }
}

async fn pause<R: Rng + ?Sized>(range: &Range<f64>, rng: &mut R) {
    if range.is_empty() {
        return;
    }
    let seconds = rng.random_range(range.clone());
    tokio::time::sleep(Duration::from_secs_f64(seconds)).await;
}
