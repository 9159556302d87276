use serde::{Deserialize, Serialize};

use super::lenient;

/// Suggested workout as served by `/api/workouts/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Minutes
    #[serde(default, deserialize_with = "lenient::integer")]
    pub duration: Option<i64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub calories_per_session: Option<i64>,
}

/// Difficulty level with the three known grades normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Other(String),
}

impl Difficulty {
    pub fn parse(level: &str) -> Self {
        match level.trim().to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Other(level.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Other(level) => level,
        }
    }
}

impl Workout {
    pub fn difficulty(&self) -> Option<Difficulty> {
        super::non_blank(self.difficulty.as_deref()).map(Difficulty::parse)
    }
}
