use std::hash::{Hash, Hasher};

/// Identity used to detect re-scraped hackathons: title and venue, compared
/// case-insensitively.
///
/// Two listings are the same event when both parts match after trimming and
/// lower-casing, so "AI Hack" at "Pune" and "ai hack" at "PUNE" collapse to
/// one key. The key keeps the trimmed text as written; SQL stores apply
/// `lower(...)` to both sides so the database collation decides case folding
/// for the column and the parameter alike.
#[derive(Debug, Clone)]
pub struct DuplicateKey {
    title: String,
    venue: String,
}

impl DuplicateKey {
    pub fn new(title: &str, venue: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            venue: venue.trim().to_string(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn venue(&self) -> &str {
        &self.venue
    }

    fn folded(&self) -> (String, String) {
        (self.title.to_lowercase(), self.venue.to_lowercase())
    }
}

impl PartialEq for DuplicateKey {
    fn eq(&self, other: &Self) -> bool {
        self.folded() == other.folded()
    }
}

impl Eq for DuplicateKey {}

impl Hash for DuplicateKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_case_insensitive_equality() {
        assert_eq!(
            DuplicateKey::new("AI Hack", "Pune"),
            DuplicateKey::new("ai hack", "PUNE")
        );
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert_eq!(
            DuplicateKey::new("  AI Hack ", "Online"),
            DuplicateKey::new("AI Hack", " online")
        );
    }

    #[test]
    fn test_different_venue_is_different_event() {
        assert_ne!(
            DuplicateKey::new("AI Hack", "Pune"),
            DuplicateKey::new("AI Hack", "Delhi")
        );
    }

    #[test]
    fn test_inner_text_must_match_exactly() {
        assert_ne!(
            DuplicateKey::new("AI Hack 2025", "Pune"),
            DuplicateKey::new("AI Hack", "Pune")
        );
    }

    #[test]
    fn test_key_keeps_written_case() {
        let key = DuplicateKey::new("  École Hack ", " Pune");
        assert_eq!(key.title(), "École Hack");
        assert_eq!(key.venue(), "Pune");
    }

    #[test]
    fn test_hash_agrees_with_equality() {
        let keys: HashSet<DuplicateKey> = [
            DuplicateKey::new("AI Hack", "Pune"),
            DuplicateKey::new("ai hack", "PUNE"),
            DuplicateKey::new("ÉCOLE", "Online"),
            DuplicateKey::new("école", "online"),
        ]
        .into_iter()
        .collect();
        assert_eq!(keys.len(), 2);
    }
}
