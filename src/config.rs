use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::data_paths::DataPaths;

/// Base URL of the demo trading backend
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Fixed demo account; the backend has no authentication
pub const DEFAULT_USER_ID: &str = "demo-user";

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Environment variable overrides (loaded after the settings file)
pub const ENV_API_URL: &str = "STOCKDESK_API_URL";
pub const ENV_USER_ID: &str = "STOCKDESK_USER";

/// Application settings, persisted as JSON in the data directory.
///
/// Resolution order: built-in defaults, then the settings file, then
/// environment variables, then command-line flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_url: String,
    pub user_id: String,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Load settings from the data directory, falling back to defaults
    pub fn load(data_paths: &DataPaths) -> Result<Self> {
        let path = data_paths.config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid settings file {}", path.display()))?;
        Ok(config)
    }

    /// Persist settings to the data directory
    pub fn save(&self, data_paths: &DataPaths) -> Result<()> {
        data_paths.ensure_directories()?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(data_paths.config_file(), json)?;
        Ok(())
    }

    /// Apply environment and command-line overrides, then validate
    pub fn resolve(mut self, api_url: Option<String>, user: Option<String>) -> Result<Self> {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            self.api_url = url;
        }
        if let Ok(user) = std::env::var(ENV_USER_ID) {
            self.user_id = user;
        }
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if let Some(user) = user {
            self.user_id = user;
        }

        // Trailing slashes would double up when joining endpoint paths
        while self.api_url.ends_with('/') {
            self.api_url.pop();
        }

        Url::parse(&self.api_url)
            .map_err(|e| anyhow!("Invalid API base URL '{}': {}", self.api_url, e))?;
        if self.user_id.is_empty() {
            return Err(anyhow!("User id cannot be empty"));
        }

        Ok(self)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
