use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_CURRENCY: &str = "INR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Prize {
    pub position: String,
    pub amount: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Prize {
    pub fn new(position: impl Into<String>, amount: i64) -> Self {
        Self {
            position: position.into(),
            amount,
            currency: default_currency(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

pub fn total_amount(prizes: &[Prize]) -> i64 {
    prizes.iter().map(|p| p.amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prize_currency_defaults_to_inr() {
        let prize: Prize = serde_json::from_str(r#"{"position":"1st","amount":1000}"#).unwrap();
        assert_eq!(prize.currency, "INR");
        assert_eq!(prize, Prize::new("1st", 1000));
    }

    #[test]
    fn test_total_amount() {
        let prizes = vec![Prize::new("1st", 100), Prize::new("2nd", 60)];
        assert_eq!(total_amount(&prizes), 160);
        assert_eq!(total_amount(&[]), 0);
    }
}
