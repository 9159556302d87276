use serde::{Deserialize, Serialize};

use super::lenient;

/// Standing as served by `/api/leaderboard/`, already ranked by the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub total_calories: Option<i64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub total_activities: Option<i64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub rank: Option<i64>,
}
