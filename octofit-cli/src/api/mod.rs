use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

use crate::config::AppConfig;
use crate::models::{User, UserUpdate};

mod envelope;
mod error;

pub use envelope::{decode_records, normalize};
pub use error::ApiError;

/// Collections exposed by the OctoFit REST API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Teams,
    Activities,
    Leaderboard,
    Workouts,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Users,
        Resource::Activities,
        Resource::Teams,
        Resource::Leaderboard,
        Resource::Workouts,
    ];

    /// Collection endpoint, relative to the API base URL
    pub fn path(self) -> &'static str {
        match self {
            Resource::Users => "/api/users/",
            Resource::Teams => "/api/teams/",
            Resource::Activities => "/api/activities/",
            Resource::Leaderboard => "/api/leaderboard/",
            Resource::Workouts => "/api/workouts/",
        }
    }

    /// Lowercase collection name used in messages
    pub fn name(self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Teams => "teams",
            Resource::Activities => "activities",
            Resource::Leaderboard => "leaderboard",
            Resource::Workouts => "workouts",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// API client for the OctoFit Tracker backend
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Default request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a new API client
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        Self::with_timeout(config, Self::DEFAULT_TIMEOUT)
    }

    /// Create a new API client with a custom request timeout
    pub fn with_timeout(config: &AppConfig, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch one collection, accepting a bare array or a `results` envelope
    pub async fn list<T: DeserializeOwned>(&self, resource: Resource) -> Result<Vec<T>, ApiError> {
        let url = self.url(resource.path());

        tracing::debug!("Fetching {} from {}", resource, url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!("Fetching {} failed with status {}", resource, status);
            return Err(ApiError::from_status(status, String::new()));
        }

        let body: Value = response.json().await?;
        let records = decode_records(body)?;

        tracing::debug!("Fetched {} {}", records.len(), resource);
        Ok(records)
    }

    /// Apply a partial update to one user
    pub async fn update_user(&self, id: &str, update: &UserUpdate) -> Result<User, ApiError> {
        let url = self.url(&format!("{}{}/", Resource::Users.path(), id));

        tracing::debug!("Updating user {} at {}", id, url);

        let response = self.client.patch(&url).json(update).send().await?;
        let status = response.status();

        if status.is_success() {
            let user: User = response.json().await?;
            tracing::info!("Updated user {}", id);
            Ok(user)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, error_text))
        }
    }
}
