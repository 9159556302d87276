use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Fallback API host when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// On-disk configuration (~/.octofit/config.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Explicit API host. Unset means "derive from the environment".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default = "default_route")]
    pub default_route: String,
}

// Default value functions
fn default_timeout() -> u64 {
    30
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_route() -> String {
    "/users".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            default_route: default_route(),
        }
    }
}

impl Config {
    /// Get config directory path (~/.octofit/)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".octofit"))
    }

    /// Get config file path (~/.octofit/config.toml)
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Resolve the config file, preferring an explicit override
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::config_file(),
        }
    }

    /// Load configuration from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }
}

/// Settings injected into the API client at startup.
///
/// Built once from flags, the config file and the environment; nothing
/// downstream reads the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl AppConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let url: String = api_base_url.into();
        Self {
            api_base_url: url.trim_end_matches('/').to_string(),
        }
    }

    /// Pick the API host: explicit override, then the config file, then a
    /// GitHub Codespaces host, then localhost.
    pub fn resolve(
        override_url: Option<&str>,
        config: &Config,
        codespace_name: Option<&str>,
    ) -> Self {
        let non_empty = |s: &&str| !s.trim().is_empty();

        if let Some(url) = override_url.filter(non_empty) {
            return Self::new(url);
        }

        if let Some(url) = config.api.base_url.as_deref().filter(non_empty) {
            return Self::new(url);
        }

        if let Some(name) = codespace_name.filter(non_empty) {
            return Self::new(format!("https://{}-8000.app.github.dev", name.trim()));
        }

        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api.base_url.is_none());
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.ui.date_format, "%Y-%m-%d");
        assert_eq!(config.ui.default_route, "/users");
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.api.base_url = Some("http://api.example.com".to_string());

        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(config.api.base_url, deserialized.api.base_url);
        assert_eq!(config.ui.date_format, deserialized.ui.date_format);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[ui]\ndate_format = \"%d/%m/%Y\"\n").unwrap();
        assert_eq!(config.ui.date_format, "%d/%m/%Y");
        assert_eq!(config.ui.default_route, "/users");
        assert_eq!(config.api.timeout_seconds, 30);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.api.timeout_seconds = 5;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api.timeout_seconds, 5);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.api.timeout_seconds, 30);
    }

    #[test]
    fn test_resolve_prefers_override() {
        let mut config = Config::default();
        config.api.base_url = Some("http://from-file:8000".to_string());

        let app = AppConfig::resolve(Some("http://flag:9000/"), &config, Some("my-space"));
        assert_eq!(app.api_base_url, "http://flag:9000");
    }

    #[test]
    fn test_resolve_uses_config_file_before_codespace() {
        let mut config = Config::default();
        config.api.base_url = Some("http://from-file:8000".to_string());

        let app = AppConfig::resolve(None, &config, Some("my-space"));
        assert_eq!(app.api_base_url, "http://from-file:8000");
    }

    #[test]
    fn test_resolve_codespace_host() {
        let app = AppConfig::resolve(None, &Config::default(), Some("my-space"));
        assert_eq!(app.api_base_url, "https://my-space-8000.app.github.dev");
    }

    #[test]
    fn test_resolve_falls_back_to_localhost() {
        let app = AppConfig::resolve(Some("  "), &Config::default(), Some(""));
        assert_eq!(app.api_base_url, DEFAULT_API_BASE_URL);
    }
}
