use storage::models::Prize;

/// Scraped totals are divided 50/30/20.
pub const SCRAPED_SPLIT: PrizeSplit = PrizeSplit([50, 30, 20]);
/// Template and fallback bases are the first prize; lower places get 60% and 30%.
pub const TIERED_SPLIT: PrizeSplit = PrizeSplit([100, 60, 30]);

const PLACES: [(&str, &str); 3] = [
    ("1st", "Winner"),
    ("2nd", "Runner Up"),
    ("3rd", "Second Runner Up"),
];

/// Percentages applied to a base amount for first, second and third place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrizeSplit([i64; 3]);

impl PrizeSplit {
    pub fn apply(&self, base: i64) -> Vec<Prize> {
        PLACES
            .iter()
            .zip(self.0)
            .map(|((position, description), percent)| {
                Prize::new(*position, base * percent / 100).with_description(*description)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use storage::models::prize::total_amount;

    fn amounts(prizes: &[Prize]) -> Vec<i64> {
        prizes.iter().map(|p| p.amount).collect()
    }

    #[test]
    fn test_tiered_split_from_base() {
        let prizes = TIERED_SPLIT.apply(500_000);
        assert_eq!(amounts(&prizes), vec![500_000, 300_000, 150_000]);
        assert_eq!(prizes[0].position, "1st");
        assert_eq!(prizes[2].description.as_deref(), Some("Second Runner Up"));
        assert!(prizes.iter().all(|p| p.currency == "INR"));
    }

    #[test]
    fn test_scraped_split() {
        let prizes = SCRAPED_SPLIT.apply(100_000);
        assert_eq!(amounts(&prizes), vec![50_000, 30_000, 20_000]);
    }

    proptest! {
        #[test]
        fn prop_scraped_split_never_exceeds_base(base in 1_000i64..=10_000_000) {
            let prizes = SCRAPED_SPLIT.apply(base);
            prop_assert!(total_amount(&prizes) <= base);
            prop_assert!(prizes.windows(2).all(|w| w[0].amount >= w[1].amount));
        }
    }
}
