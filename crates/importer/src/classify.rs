use rand::Rng;
use rand::seq::IndexedRandom;
use storage::models::hackathon::MAX_TAGS;
use storage::models::{Address, Category, Location};

use crate::synthesizer::catalogue::CITIES;

pub const MULTIPLE_LOCATIONS: &str = "Multiple Locations";
pub const COUNTRY: &str = "India";

const ONLINE_INDICATORS: [&str; 3] = ["online", "virtual", "remote"];

const BASE_TAGS: [&str; 4] = ["hackathon", "competition", "innovation", "technology"];
const TECH_TAGS: [&str; 5] = ["coding", "programming", "development", "software", "tech"];

// Checked in order; the first category with a matching keyword wins.
const CATEGORY_KEYWORDS: [(Category, &[&str]); 9] = [
    (
        Category::AiMl,
        &["ai", "ml", "machine learning", "artificial intelligence", "deep learning"],
    ),
    (
        Category::WebDevelopment,
        &["web", "frontend", "backend", "fullstack", "react", "angular", "vue"],
    ),
    (
        Category::MobileDevelopment,
        &["mobile", "android", "ios", "app", "flutter", "react native"],
    ),
    (
        Category::Blockchain,
        &["blockchain", "crypto", "bitcoin", "ethereum", "web3", "defi"],
    ),
    (
        Category::Iot,
        &["iot", "internet of things", "sensor", "embedded"],
    ),
    (Category::GameDevelopment, &["game", "gaming", "unity", "unreal"]),
    (
        Category::DataScience,
        &["data", "analytics", "science", "visualization", "pandas", "numpy"],
    ),
    (
        Category::Cybersecurity,
        &["security", "cyber", "pentest", "vulnerability"],
    ),
    (Category::Design, &["design", "ui", "ux", "figma", "prototype"]),
];

/// Infers a category from title keywords. Single words must match a whole
/// word of the title, phrases may appear anywhere.
pub fn infer_category(title: &str) -> Category {
    let lower = title.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| {
            keywords.iter().any(|keyword| {
                if keyword.contains(' ') {
                    lower.contains(keyword)
                } else {
                    words.contains(keyword)
                }
            })
        })
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

pub fn category_tags(category: Category) -> &'static [&'static str] {
    match category {
        Category::AiMl => &[
            "artificial intelligence",
            "machine learning",
            "deep learning",
            "neural networks",
        ],
        Category::WebDevelopment => &["web development", "frontend", "backend", "fullstack"],
        Category::MobileDevelopment => &["mobile app", "android", "ios", "cross platform"],
        Category::Blockchain => &["blockchain", "cryptocurrency", "web3", "smart contracts"],
        Category::Iot => &["iot", "sensors", "embedded systems", "connected devices"],
        Category::GameDevelopment => &["game development", "unity", "gaming", "interactive"],
        Category::DataScience => &["data science", "analytics", "big data", "visualization"],
        Category::Cybersecurity => &["cybersecurity", "security", "ethical hacking", "privacy"],
        Category::Design => &["ui design", "ux design", "prototype", "user experience"],
        Category::Other => &[],
    }
}

/// Four base tags, two picked from the category and two general tech tags.
pub fn generate_tags<R: Rng + ?Sized>(category: Category, rng: &mut R) -> Vec<String> {
    let mut tags: Vec<String> = BASE_TAGS.iter().map(|t| t.to_string()).collect();
    tags.extend(
        category_tags(category)
            .choose_multiple(rng, 2)
            .map(|t| t.to_string()),
    );
    tags.extend(TECH_TAGS.choose_multiple(rng, 2).map(|t| t.to_string()));
    tags.truncate(MAX_TAGS);
    tags
}

/// Reads the location from free card text: online wording first, then a
/// known city, otherwise a hybrid event across several cities.
pub fn infer_location(text: &str) -> Location {
    let lower = text.to_lowercase();

    if ONLINE_INDICATORS.iter().any(|word| lower.contains(word)) {
        return Location::Online;
    }

    if let Some(city) = CITIES
        .iter()
        .find(|city| lower.contains(&city.name.to_lowercase()))
    {
        return Location::offline(city.name, Address::city(city.name, city.state, COUNTRY));
    }

    Location::hybrid(
        MULTIPLE_LOCATIONS,
        Address::city("Various", COUNTRY, COUNTRY),
    )
}

/// Listing URL path segment derived from a title.
pub fn slugify(title: &str) -> String {
    title.trim().to_lowercase().replace([' ', '/'], "-")
}
