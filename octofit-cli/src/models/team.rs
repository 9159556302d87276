use serde::{Deserialize, Deserializer, Serialize};

use super::lenient;

/// Team as served by `/api/teams/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_members")]
    pub members: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Team {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Members {
    List(Vec<String>),
    Text(String),
}

/// Members arrive as a JSON list or, from older rows, a comma-separated string
fn deserialize_members<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let members = Option::<Members>::deserialize(deserializer)?;
    Ok(match members {
        Some(Members::List(list)) => list,
        Some(Members::Text(text)) => text
            .split(',')
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect(),
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_members_list() {
        let team: Team = serde_json::from_value(json!({
            "_id": "t1",
            "name": "Team DC",
            "members": ["Batman", "Superman"]
        }))
        .unwrap();
        assert_eq!(team.members, vec!["Batman", "Superman"]);
    }

    #[test]
    fn test_members_comma_string() {
        let team: Team =
            serde_json::from_value(json!({"name": "Team Marvel", "members": "Thor, Hulk ,"}))
                .unwrap();
        assert_eq!(team.members, vec!["Thor", "Hulk"]);
    }

    #[test]
    fn test_members_missing_or_null() {
        let team: Team = serde_json::from_value(json!({"name": "Solo"})).unwrap();
        assert!(team.members.is_empty());

        let team: Team = serde_json::from_value(json!({"name": "Solo", "members": null})).unwrap();
        assert!(team.members.is_empty());
    }
}
