use serde::{Deserialize, Serialize};

use super::lenient;

/// Logged activity as served by `/api/activities/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub user_id: Option<String>,
    /// Display name of the athlete; older payloads call it `user_name`
    #[serde(default, alias = "user_name")]
    pub user: Option<String>,
    #[serde(default)]
    pub activity_type: Option<String>,
    /// Minutes
    #[serde(default, deserialize_with = "lenient::integer")]
    pub duration: Option<i64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub distance: Option<f64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub calories: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_name_alias() {
        let activity: Activity = serde_json::from_value(json!({
            "_id": "a1",
            "user_name": "Flash",
            "activity_type": "Running",
            "duration": 30,
            "distance": 5.0,
            "calories": 300
        }))
        .unwrap();

        assert_eq!(activity.user.as_deref(), Some("Flash"));
        assert_eq!(activity.duration, Some(30));
        assert_eq!(activity.distance, Some(5.0));
    }
}
