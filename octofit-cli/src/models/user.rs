use serde::{Deserialize, Serialize};

use super::lenient;

/// Athlete profile as served by `/api/users/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Free-text team name, matched against `/api/teams/` for editing
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn team_name(&self) -> Option<&str> {
        super::non_blank(self.team.as_deref())
    }
}

/// Partial update body for `PATCH /api/users/{id}/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub team: String,
}

impl From<&User> for UserUpdate {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone().unwrap_or_default(),
            email: user.email.clone().unwrap_or_default(),
            team: user.team.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_from_api_payload() {
        let user: User = serde_json::from_value(json!({
            "_id": "65f0c1",
            "name": "Iron Man",
            "email": "ironman@marvel.com",
            "team": "Team Marvel",
            "created_at": "2024-03-05T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(user.id.as_deref(), Some("65f0c1"));
        assert_eq!(user.team_name(), Some("Team Marvel"));
    }

    #[test]
    fn test_blank_team_is_none() {
        let user: User = serde_json::from_value(json!({"name": "Ana", "team": ""})).unwrap();
        assert_eq!(user.team_name(), None);
        assert!(user.id.is_none());
    }

    #[test]
    fn test_update_body_shape() {
        let user = User {
            id: Some("1".into()),
            name: Some("Ana".into()),
            email: None,
            team: None,
            created_at: None,
        };

        let body = serde_json::to_value(UserUpdate::from(&user)).unwrap();
        assert_eq!(body, json!({"name": "Ana", "email": "", "team": ""}));
    }
}
