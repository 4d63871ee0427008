//! Application configuration.
//!
//! Resolution order, lowest to highest priority:
//!
//! 1. Built-in defaults
//! 2. `config.toml` in the PetSync config directory
//! 3. `PETSYNC_*` environment variables

use crate::paths::PetSyncPaths;
use petsync_core::error::Result;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_BREED_API_URL: &str = "https://dog.ceo/api";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_GUARD_DELAY_MS: u64 = 300;
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 2300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Used when no secret is configured. Public by nature: see `crypto`.
const DEFAULT_SECRET_KEY: &str = "petsync-session-key";

pub const ENV_API_URL: &str = "PETSYNC_API_URL";
pub const ENV_BREED_API_URL: &str = "PETSYNC_BREED_API_URL";
pub const ENV_SECRET_KEY: &str = "PETSYNC_SECRET_KEY";
pub const ENV_LOG_LEVEL: &str = "PETSYNC_LOG_LEVEL";

/// On-disk shape of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub api_url: Option<String>,
    pub breed_api_url: Option<String>,
    pub secret_key: Option<String>,
    pub log_level: Option<String>,
    pub guard_delay_ms: Option<u64>,
    pub redirect_delay_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Overlays values found through `lookup` (environment by default).
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(value) = non_empty(ENV_API_URL) {
            self.api_url = Some(value);
        }
        if let Some(value) = non_empty(ENV_BREED_API_URL) {
            self.breed_api_url = Some(value);
        }
        if let Some(value) = non_empty(ENV_SECRET_KEY) {
            self.secret_key = Some(value);
        }
        if let Some(value) = non_empty(ENV_LOG_LEVEL) {
            self.log_level = Some(value);
        }
    }
}

/// Resolved configuration.
#[derive(Debug)]
pub struct AppConfig {
    /// Backend base URL, without trailing slash.
    pub api_url: String,
    pub breed_api_url: String,
    /// Session cipher secret.
    pub secret_key: SecretString,
    pub log_level: String,
    /// Wait before the route guard reads the persisted session.
    pub guard_delay: Duration,
    /// Pause between a success notification and the follow-up navigation.
    pub redirect_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_file(ConfigFile::default())
    }
}

impl AppConfig {
    /// Loads `config.toml` (if present) and applies environment overrides.
    pub fn load(paths: &PetSyncPaths) -> Result<Self> {
        Self::load_with(paths, |key| std::env::var(key).ok())
    }

    /// Like [`load`](Self::load) with an explicit variable lookup.
    pub fn load_with(
        paths: &PetSyncPaths,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let path = paths.config_file()?;
        let mut file = if path.exists() {
            let content = fs::read_to_string(&path)?;
            toml::from_str::<ConfigFile>(&content)?
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            ConfigFile::default()
        };

        file.apply_env(lookup);
        Ok(Self::from_file(file))
    }

    pub fn from_file(file: ConfigFile) -> Self {
        if file.secret_key.is_none() {
            tracing::debug!("No secret key configured, using built-in key");
        }

        Self {
            api_url: trim_base_url(file.api_url.as_deref().unwrap_or(DEFAULT_API_URL)),
            breed_api_url: trim_base_url(
                file.breed_api_url
                    .as_deref()
                    .unwrap_or(DEFAULT_BREED_API_URL),
            ),
            secret_key: SecretString::from(
                file.secret_key
                    .unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string()),
            ),
            log_level: file
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            guard_delay: Duration::from_millis(
                file.guard_delay_ms.unwrap_or(DEFAULT_GUARD_DELAY_MS),
            ),
            redirect_delay: Duration::from_millis(
                file.redirect_delay_ms.unwrap_or(DEFAULT_REDIRECT_DELAY_MS),
            ),
            request_timeout: Duration::from_secs(
                file.request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
        }
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn defaults_apply_without_file_or_env() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_with(&PetSyncPaths::new(Some(dir.path())), |_| None).unwrap();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.breed_api_url, DEFAULT_BREED_API_URL);
        assert_eq!(config.guard_delay, Duration::from_millis(300));
        assert_eq!(config.redirect_delay, Duration::from_millis(2300));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn env_overrides_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "api_url = \"http://file.example/api/\"\nguard_delay_ms = 50\nsecret_key = \"from-file\"\n",
        )
        .unwrap();
        let env: HashMap<&str, &str> = [(ENV_API_URL, "http://env.example/api")].into();

        let config = AppConfig::load_with(&PetSyncPaths::new(Some(dir.path())), |key| {
            env.get(key).map(|value| value.to_string())
        })
        .unwrap();

        assert_eq!(config.api_url, "http://env.example/api");
        assert_eq!(config.guard_delay, Duration::from_millis(50));
        assert_eq!(config.secret_key.expose_secret(), "from-file");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = AppConfig::from_file(ConfigFile {
            api_url: Some("http://host/api/".to_string()),
            ..Default::default()
        });
        assert_eq!(config.api_url, "http://host/api");
    }

    #[test]
    fn invalid_toml_is_a_serialization_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "api_url = [").unwrap();
        let err = AppConfig::load_with(&PetSyncPaths::new(Some(dir.path())), |_| None).unwrap_err();
        assert!(err.to_string().contains("TOML"));
    }
}
