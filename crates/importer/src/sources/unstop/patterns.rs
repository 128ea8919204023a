use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

pub const MIN_PRIZE: i64 = 1_000;
pub const MAX_PRIZE: i64 = 10_000_000;

const MIN_DATE_YEAR: i32 = 2024;
const MAX_DATE_CANDIDATES: usize = 3;
const DATE_FORMATS: [&str; 6] = [
    "%d/%m/%Y",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%Y-%m-%d",
    "%d %B %Y",
    "%B %d, %Y",
];

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    // Scanned in this order; candidates keep pattern order, not text order.
    static ref DATE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"\d{1,2}[-/]\d{1,2}[-/]\d{4}").unwrap(),
        Regex::new(r"\d{4}[-/]\d{1,2}[-/]\d{1,2}").unwrap(),
        Regex::new(r"\d{1,2}\s+\w+\s+\d{4}").unwrap(),
        Regex::new(r"\w+\s+\d{1,2},?\s+\d{4}").unwrap(),
    ];

    static ref DAYS_LEFT: Regex = Regex::new(r"(?i)\b(\d{1,3})\s+days?\s+left\b").unwrap();

    static ref PRIZE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"₹\s*([\d,]+)").unwrap(),
        Regex::new(r"(?i)\bRs\.?\s*([\d,]+)").unwrap(),
        Regex::new(r"\$\s*([\d,]+)").unwrap(),
        Regex::new(r"(?i)worth\s*₹\s*([\d,]+)").unwrap(),
    ];

    static ref THOUSANDS_PRIZE: Regex = Regex::new(r"(?i)(\d+)(k?)\s*prize").unwrap();
}

/// Collapses runs of whitespace and trims.
pub fn clean_text(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Absolute dates found in `text`, at most three, in discovery order.
///
/// Each candidate is parsed with the first format that accepts it; dates
/// before 2024 or before `today` are dropped.
pub fn find_dates(text: &str, today: NaiveDate) -> Vec<NaiveDate> {
    DATE_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.find_iter(text).map(|m| m.as_str()))
        .take(MAX_DATE_CANDIDATES)
        .filter_map(parse_date)
        .filter(|date| date.year() >= MIN_DATE_YEAR && *date >= today)
        .collect()
}

fn parse_date(candidate: &str) -> Option<NaiveDate> {
    let candidate = clean_text(candidate);
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&candidate, format).ok())
}

/// Days remaining from a relative marker such as "5 days left".
pub fn days_left(text: &str) -> Option<i64> {
    DAYS_LEFT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Prize amounts mentioned in `text` that fall within the plausible range.
pub fn find_prize_amounts(text: &str) -> Vec<i64> {
    let mut amounts: Vec<i64> = PRIZE_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.captures_iter(text))
        .filter_map(|caps| caps.get(1).and_then(|m| parse_amount(m.as_str())))
        .collect();

    for caps in THOUSANDS_PRIZE.captures_iter(text) {
        let Some(amount) = caps.get(1).and_then(|m| parse_amount(m.as_str())) else {
            continue;
        };
        let thousands = caps.get(2).is_some_and(|k| !k.as_str().is_empty());
        amounts.push(if thousands {
            amount.saturating_mul(1_000)
        } else {
            amount
        });
    }

    amounts.retain(|amount| (MIN_PRIZE..=MAX_PRIZE).contains(amount));
    amounts
}

fn parse_amount(raw: &str) -> Option<i64> {
    raw.replace(',', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  AI \n\t Hack  "), "AI Hack");
    }

    #[test]
    fn test_find_dates_in_supported_formats() {
        assert_eq!(find_dates("Starts 15/03/2025", today()), vec![ymd(2025, 3, 15)]);
        assert_eq!(find_dates("Starts 2025-04-02", today()), vec![ymd(2025, 4, 2)]);
        assert_eq!(find_dates("Starts 5 April 2025", today()), vec![ymd(2025, 4, 5)]);
        assert_eq!(find_dates("Starts April 5, 2025", today()), vec![ymd(2025, 4, 5)]);
    }

    #[test]
    fn test_find_dates_drops_old_and_past() {
        assert!(find_dates("Held 10/10/2023", today()).is_empty());
        assert!(find_dates("Held 10/02/2025", today()).is_empty());
    }

    #[test]
    fn test_find_dates_caps_candidates() {
        let text = "01/04/2025 02/04/2025 03/04/2025 04/04/2025";
        assert_eq!(find_dates(text, today()).len(), 3);
    }

    #[test]
    fn test_days_left() {
        assert_eq!(days_left("Hurry! 12 days left to register"), Some(12));
        assert_eq!(days_left("1 Day Left"), Some(1));
        assert_eq!(days_left("no deadline"), None);
    }

    #[test]
    fn test_prize_amounts() {
        assert_eq!(find_prize_amounts("Win ₹ 1,50,000 in cash"), vec![150_000]);
        assert_eq!(find_prize_amounts("Rs. 25,000 for winners"), vec![25_000]);
        assert_eq!(find_prize_amounts("$5,000 pool"), vec![5_000]);
        assert_eq!(find_prize_amounts("50k prize pool"), vec![50_000]);
        assert_eq!(find_prize_amounts("Prizes worth ₹2,00,000"), vec![200_000, 200_000]);
    }

    #[test]
    fn test_prize_amounts_out_of_range_ignored() {
        assert!(find_prize_amounts("₹500 goodies").is_empty());
        assert!(find_prize_amounts("₹50,00,00,000").is_empty());
        assert!(find_prize_amounts("no money mentioned").is_empty());
    }
}
