use scraper::{ElementRef, Html, Selector};

use super::patterns::clean_text;
use crate::traits::{FieldChain, FieldStrategy, first_match};

pub const CARD_SELECTORS: [&str; 9] = [
    ".opportunity-card",
    ".card-content",
    "[data-testid=\"opportunity-card\"]",
    ".opportunity-listing-card",
    ".listing-card",
    ".card",
    ".competition-card",
    "[class*=\"card\"]",
    "[class*=\"opportunity\"]",
];

pub const TITLE_SELECTORS: [&str; 7] = [
    ".opportunity-title",
    ".card-title",
    "h3",
    "h2",
    "h4",
    "[data-testid=\"opportunity-title\"]",
    ".title",
];

pub const ORGANIZER_SELECTORS: [&str; 5] = [
    ".organizer",
    ".company-name",
    ".org-name",
    "[data-testid=\"organizer\"]",
    ".organization",
];

pub const DESCRIPTION_SELECTORS: [&str; 4] = [
    ".opportunity-description",
    ".card-description",
    ".description",
    "p",
];

const CARD_KEYWORDS: [&str; 5] = ["hackathon", "competition", "challenge", "coding", "tech"];

/// Text of the first element matching a CSS selector.
pub struct CssField {
    selector: Selector,
}

impl CssField {
    pub fn parse(selector: &str) -> Option<Self> {
        match Selector::parse(selector) {
            Ok(selector) => Some(Self { selector }),
            Err(e) => {
                tracing::warn!("Ignoring invalid selector '{}': {:?}", selector, e);
                None
            }
        }
    }
}

impl FieldStrategy for CssField {
    fn extract(&self, card: ElementRef<'_>) -> Option<String> {
        card.select(&self.selector)
            .next()
            .map(|element| clean_text(&element.text().collect::<String>()))
            .filter(|text| !text.is_empty())
    }
}

pub fn css_chain(selectors: &[&str]) -> FieldChain {
    selectors
        .iter()
        .filter_map(|s| CssField::parse(s))
        .map(|field| Box::new(field) as Box<dyn FieldStrategy>)
        .collect()
}

/// Ordered strategies for each text field of a card.
pub struct CardFields {
    pub title: FieldChain,
    pub organizer: FieldChain,
    pub description: FieldChain,
}

impl Default for CardFields {
    fn default() -> Self {
        Self {
            title: css_chain(&TITLE_SELECTORS),
            organizer: css_chain(&ORGANIZER_SELECTORS),
            description: css_chain(&DESCRIPTION_SELECTORS),
        }
    }
}

/// Owned copy of everything extraction needs from one card, so the parsed
/// document can be dropped before any awaiting happens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardSnapshot {
    pub title: Option<String>,
    pub organizer: Option<String>,
    pub description: Option<String>,
    pub text: String,
    pub link: Option<String>,
}

impl CardSnapshot {
    pub fn capture(card: ElementRef<'_>, fields: &CardFields) -> Self {
        Self {
            title: first_match(&fields.title, card),
            organizer: first_match(&fields.organizer, card),
            description: first_match(&fields.description, card),
            text: clean_text(&card.text().collect::<Vec<_>>().join(" ")),
            link: first_link(card),
        }
    }
}

fn first_link(card: ElementRef<'_>) -> Option<String> {
    let anchor = Selector::parse("a[href]").ok()?;
    card.select(&anchor)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
}

/// Locates listing cards: the first card selector with any hits wins,
/// otherwise every `div` whose text mentions a hackathon-like keyword.
pub fn find_cards(document: &Html) -> Vec<ElementRef<'_>> {
    for raw in CARD_SELECTORS {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        let cards: Vec<ElementRef<'_>> = document.select(&selector).collect();
        if !cards.is_empty() {
            tracing::info!("Found {} cards using selector: {}", cards.len(), raw);
            return cards;
        }
    }

    let Ok(divs) = Selector::parse("div") else {
        return Vec::new();
    };
    let cards: Vec<ElementRef<'_>> = document
        .select(&divs)
        .filter(|div| {
            let text = div.text().collect::<String>().to_lowercase();
            CARD_KEYWORDS.iter().any(|keyword| text.contains(keyword))
        })
        .collect();

    tracing::info!("Keyword fallback found {} potential cards", cards.len());
    cards
}

/// Parses a listing page into at most `limit` card snapshots.
pub fn parse_listing(html: &str, fields: &CardFields, limit: usize) -> Vec<CardSnapshot> {
    let document = Html::parse_document(html);
    find_cards(&document)
        .into_iter()
        .take(limit)
        .map(|card| CardSnapshot::capture(card, fields))
        .collect()
}
