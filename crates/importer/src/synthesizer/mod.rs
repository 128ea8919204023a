pub mod catalogue;

pub use catalogue::{CITIES, Catalogue, City, Template};

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use storage::models::{
    Address, Difficulty, HackathonRecord, Links, Location, Schedule, Source, TeamSize,
};

use crate::classify::{COUNTRY, generate_tags, slugify};
use crate::config::UNSTOP_BASE_URL;
use crate::prizes::TIERED_SPLIT;

const MIN_GENERATED: usize = 12;
const MAX_GENERATED: usize = 15;

/// Builds plausible listings from a [`Catalogue`] when scraping yields nothing.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    catalogue: Catalogue,
}

impl Synthesizer {
    pub fn new(catalogue: Catalogue) -> Self {
        Self { catalogue }
    }

    /// Samples 12 to 15 distinct templates (fewer if the catalogue is
    /// smaller) and dates them relative to `now`. Never empty.
    pub fn generate<R: Rng + ?Sized>(&self, now: DateTime<Utc>, rng: &mut R) -> Vec<HackathonRecord> {
        let templates = self.catalogue.templates();
        let count = rng
            .random_range(MIN_GENERATED..=MAX_GENERATED)
            .min(templates.len());

        let chosen: Vec<&Template> = templates.choose_multiple(rng, count).collect();
        let records: Vec<HackathonRecord> = chosen
            .into_iter()
            .map(|template| self.synthesize(template, now, rng))
            .collect();

        tracing::info!("Generated {} hackathons from templates", records.len());
        records
    }

    fn synthesize<R: Rng + ?Sized>(
        &self,
        template: &Template,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> HackathonRecord {
        let start_in = rng.random_range(5..=60);
        let duration = rng.random_range(1..=7);
        let deadline_in = rng.random_range(1..start_in);

        let start = now + Duration::days(start_in);
        let schedule = Schedule::clamped(
            now + Duration::days(deadline_in),
            start,
            start + Duration::days(duration),
        );

        let mut record = HackathonRecord::new(template.title, schedule);
        record.organizer = template.organizer.to_string();
        record.description = template.description.to_string();
        record.category = template.category;
        record.difficulty = random_difficulty(rng);
        record.location = self.random_location(rng);
        record.team_size = TeamSize::new(rng.random_range(1..=2), rng.random_range(3..=6));
        record.prizes = TIERED_SPLIT.apply(template.base_prize);
        record.tags = generate_tags(template.category, rng);
        record.status = schedule.status_at(now);
        record.links = Links::website(format!(
            "{}/hackathons/{}",
            UNSTOP_BASE_URL,
            slugify(template.title)
        ));
        record.featured = rng.random_bool(0.5);
        record.source = Source::Synthesized;
        record.scraped_at = Some(now);

        record.normalized()
    }

    fn random_location<R: Rng + ?Sized>(&self, rng: &mut R) -> Location {
        let city = match self.catalogue.cities().choose(rng) {
            Some(city) => *city,
            None => return Location::Online,
        };
        let address = Address::city(city.name, city.state, COUNTRY);

        match rng.random_range(0..3) {
            0 => Location::Online,
            1 => Location::hybrid(format!("{} & Online", city.name), address),
            _ => {
                let venue = match rng.random_range(0..4) {
                    0 => format!("TechHub {}", city.name),
                    1 => format!("{} Convention Center", city.name),
                    2 => format!("Innovation Center {}", city.name),
                    _ => format!("{} Technology Park", city.name),
                };
                Location::offline(venue, address)
            }
        }
    }
}

pub fn random_difficulty<R: Rng + ?Sized>(rng: &mut R) -> Difficulty {
    Difficulty::ALL
        .choose(rng)
        .copied()
        .unwrap_or_default()
}
