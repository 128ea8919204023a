use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use storage::models::{HackathonRecord, Links, Schedule, Source, TeamSize};
use url::Url;
use validator::Validate;

use super::patterns::{days_left, find_dates, find_prize_amounts};
use super::selectors::CardSnapshot;
use crate::classify::{generate_tags, infer_category, infer_location, slugify};
use crate::error::Result;
use crate::prizes::{SCRAPED_SPLIT, TIERED_SPLIT};
use crate::synthesizer::random_difficulty;

pub const UNKNOWN_ORGANIZER: &str = "Unknown Organization";

const MIN_DESCRIPTION_LEN: usize = 50;
const DESCRIPTION_PADDING: &str =
    "This hackathon offers great opportunities to learn, network, and win exciting prizes.";
const FALLBACK_PRIZE_BASES: [i64; 5] = [50_000, 100_000, 200_000, 500_000, 1_000_000];

/// Dates recovered from card text; any of them may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoundDates {
    pub registration_deadline: Option<DateTime<Utc>>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl FoundDates {
    /// Three dates map to deadline, start and end by order; two to start and
    /// end; one to the start. A "N days left" marker supplies the deadline
    /// when no absolute one was found.
    pub fn scan(text: &str, now: DateTime<Utc>) -> Self {
        let mut dates = find_dates(text, now.date_naive());
        dates.sort();
        let dates: Vec<DateTime<Utc>> = dates.into_iter().map(midnight).collect();

        let mut found = match dates.as_slice() {
            [deadline, start, end, ..] => Self {
                registration_deadline: Some(*deadline),
                start_date: Some(*start),
                end_date: Some(*end),
            },
            [start, end] => Self {
                start_date: Some(*start),
                end_date: Some(*end),
                ..Self::default()
            },
            [start] => Self {
                start_date: Some(*start),
                ..Self::default()
            },
            [] => Self::default(),
        };

        if found.registration_deadline.is_none() {
            found.registration_deadline = days_left(text).map(|days| now + Duration::days(days));
        }

        found
    }

    /// Fills gaps with random offsets from `now`, then clamps into order.
    pub fn into_schedule<R: Rng + ?Sized>(self, now: DateTime<Utc>, rng: &mut R) -> Schedule {
        let deadline = self
            .registration_deadline
            .unwrap_or_else(|| now + Duration::days(rng.random_range(5..=30)));
        let start = self
            .start_date
            .unwrap_or_else(|| now + Duration::days(rng.random_range(7..=45)));
        let end = self
            .end_date
            .unwrap_or_else(|| start + Duration::days(rng.random_range(1..=7)));

        Schedule::clamped(deadline, start, end)
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Turns a card snapshot into a normalized record, substituting defaults for
/// anything the card does not provide.
pub struct CardExtractor {
    base_url: Url,
}

impl CardExtractor {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    pub fn extract<R: Rng + ?Sized>(
        &self,
        card: &CardSnapshot,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<HackathonRecord> {
        let title = card
            .title
            .clone()
            .unwrap_or_else(|| format!("Hackathon {}", rng.random_range(1000..=9999)));

        let schedule = FoundDates::scan(&card.text, now).into_schedule(now, rng);
        let category = infer_category(&title);

        let mut record = HackathonRecord::new(title, schedule);
        record.organizer = card
            .organizer
            .clone()
            .unwrap_or_else(|| UNKNOWN_ORGANIZER.to_string());
        record.description = self.description(card, &record.title);
        record.category = category;
        record.difficulty = random_difficulty(rng);
        record.location = infer_location(&card.text);
        record.team_size = TeamSize::new(rng.random_range(1..=2), rng.random_range(3..=5));
        record.prizes = self.prizes(&card.text, rng);
        record.tags = generate_tags(category, rng);
        record.status = schedule.status_at(now);
        record.links = Links::website(self.website(card, &record.title));
        record.featured = rng.random_bool(0.5);
        record.source = Source::Scraped;
        record.scraped_at = Some(now);

        let record = record.normalized();
        record.validate()?;
        Ok(record)
    }

    fn description(&self, card: &CardSnapshot, title: &str) -> String {
        let description = card
            .description
            .clone()
            .unwrap_or_else(|| format!("Join {} and showcase your innovation skills!", title));

        if description.chars().count() < MIN_DESCRIPTION_LEN {
            format!("{} {}", description, DESCRIPTION_PADDING)
        } else {
            description
        }
    }

    fn prizes<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> Vec<storage::models::Prize> {
        match find_prize_amounts(text).into_iter().max() {
            Some(total) => SCRAPED_SPLIT.apply(total),
            None => {
                let base = FALLBACK_PRIZE_BASES
                    .choose(rng)
                    .copied()
                    .unwrap_or(FALLBACK_PRIZE_BASES[0]);
                TIERED_SPLIT.apply(base)
            }
        }
    }

    fn website(&self, card: &CardSnapshot, title: &str) -> String {
        card.link
            .as_deref()
            .and_then(|href| self.base_url.join(href).ok())
            .map(String::from)
            .unwrap_or_else(|| format!("{}hackathons/{}", self.base_url, slugify(title)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use storage::models::{Category, HackathonStatus, LocationKind};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap()
    }

    fn day(m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, m, d, 0, 0, 0).unwrap()
    }

    fn extractor() -> CardExtractor {
        CardExtractor::new(Url::parse("https://unstop.com").unwrap())
    }

    #[test]
    fn test_three_dates_map_by_order() {
        let found = FoundDates::scan("Ends 20/03/2025, starts 15/03/2025, apply by 10/03/2025", now());
        assert_eq!(found.registration_deadline, Some(day(3, 10)));
        assert_eq!(found.start_date, Some(day(3, 15)));
        assert_eq!(found.end_date, Some(day(3, 20)));
    }

    #[test]
    fn test_two_dates_are_start_and_end() {
        let found = FoundDates::scan("15/03/2025 to 17/03/2025", now());
        assert_eq!(found.registration_deadline, None);
        assert_eq!(found.start_date, Some(day(3, 15)));
        assert_eq!(found.end_date, Some(day(3, 17)));
    }

    #[test]
    fn test_days_left_sets_deadline() {
        let found = FoundDates::scan("Starts 15/03/2025 - 4 days left", now());
        assert_eq!(found.registration_deadline, Some(now() + Duration::days(4)));
        assert_eq!(found.start_date, Some(day(3, 15)));
        assert_eq!(found.end_date, None);
    }

    #[test]
    fn test_missing_dates_are_filled_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let schedule = FoundDates::default().into_schedule(now(), &mut rng);
            assert!(schedule.start_date() >= now() + Duration::days(7));
            assert!(schedule.start_date() <= now() + Duration::days(45));
            assert!(schedule.registration_deadline() <= schedule.start_date());
            assert!((1..=7).contains(&(schedule.end_date() - schedule.start_date()).num_days()));
        }
    }

    #[test]
    fn test_full_card_extraction() {
        let card = CardSnapshot {
            title: Some("Blockchain Builders Summit".into()),
            organizer: Some("Chain Guild".into()),
            description: Some("Short blurb".into()),
            text: "Blockchain Builders Summit Mumbai Win ₹1,00,000 10/03/2025 15/03/2025 17/03/2025".into(),
            link: Some("/hackathons/bbs".into()),
        };
        let mut rng = StdRng::seed_from_u64(5);
        let record = extractor().extract(&card, now(), &mut rng).unwrap();

        assert_eq!(record.title, "Blockchain Builders Summit");
        assert_eq!(record.organizer, "Chain Guild");
        assert!(record.description.starts_with("Short blurb This hackathon offers"));
        assert_eq!(record.category, Category::Blockchain);
        assert_eq!(record.location.kind(), LocationKind::Offline);
        assert_eq!(record.location.venue(), "Mumbai");
        assert_eq!(record.schedule.start_date(), day(3, 15));
        assert_eq!(record.status, HackathonStatus::Upcoming);
        assert_eq!(
            record.prizes.iter().map(|p| p.amount).collect::<Vec<_>>(),
            vec![50_000, 30_000, 20_000]
        );
        assert_eq!(
            record.links.website.as_deref(),
            Some("https://unstop.com/hackathons/bbs")
        );
        assert_eq!(record.source, Source::Scraped);
        assert_eq!(record.scraped_at, Some(now()));
        assert!(record.tags.len() <= 8);
    }

    #[test]
    fn test_empty_card_gets_placeholders() {
        let mut rng = StdRng::seed_from_u64(9);
        let record = extractor()
            .extract(&CardSnapshot::default(), now(), &mut rng)
            .unwrap();

        assert!(record.title.starts_with("Hackathon "));
        assert_eq!(record.organizer, UNKNOWN_ORGANIZER);
        assert!(record.description.starts_with(&format!("Join {}", record.title)));
        assert_eq!(record.location.kind(), LocationKind::Hybrid);
        assert_eq!(record.prizes.len(), 3);
        assert!(FALLBACK_PRIZE_BASES.contains(&record.prizes[0].amount));
        assert_eq!(
            record.links.website,
            Some(format!("https://unstop.com/hackathons/{}", slugify(&record.title)))
        );
    }
}
