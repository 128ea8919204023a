use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum Category {
    #[serde(rename = "AI/ML")]
    AiMl,
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Mobile Development")]
    MobileDevelopment,
    #[serde(rename = "Blockchain")]
    Blockchain,
    #[serde(rename = "IoT")]
    Iot,
    #[serde(rename = "Game Development")]
    GameDevelopment,
    #[serde(rename = "Data Science")]
    DataScience,
    #[serde(rename = "Cybersecurity")]
    Cybersecurity,
    #[serde(rename = "Design")]
    Design,
    #[default]
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::AiMl,
        Category::WebDevelopment,
        Category::MobileDevelopment,
        Category::Blockchain,
        Category::Iot,
        Category::GameDevelopment,
        Category::DataScience,
        Category::Cybersecurity,
        Category::Design,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::AiMl => "AI/ML",
            Category::WebDevelopment => "Web Development",
            Category::MobileDevelopment => "Mobile Development",
            Category::Blockchain => "Blockchain",
            Category::Iot => "IoT",
            Category::GameDevelopment => "Game Development",
            Category::DataScience => "Data Science",
            Category::Cybersecurity => "Cybersecurity",
            Category::Design => "Design",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown difficulty: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_to_display_name() {
        let json = serde_json::to_string(&Category::AiMl).unwrap();
        assert_eq!(json, "\"AI/ML\"");

        let parsed: Category = serde_json::from_str("\"Game Development\"").unwrap();
        assert_eq!(parsed, Category::GameDevelopment);
    }

    #[test]
    fn test_category_from_str_is_case_insensitive() {
        assert_eq!("iot".parse::<Category>().unwrap(), Category::Iot);
        assert_eq!(" data science ".parse::<Category>().unwrap(), Category::DataScience);
        assert!("Technology".parse::<Category>().is_err());
    }

    #[test]
    fn test_difficulty_defaults_to_intermediate() {
        assert_eq!(Difficulty::default(), Difficulty::Intermediate);
        assert_eq!("advanced".parse::<Difficulty>().unwrap(), Difficulty::Advanced);
    }
}
