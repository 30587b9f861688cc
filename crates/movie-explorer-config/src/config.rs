use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::paths::PathManager;

/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV: &str = "REELSTASH_OMDB_API_KEY";

fn default_base_url() -> String {
    "https://www.omdbapi.com/".to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// OMDb API key. Absence is a fatal startup condition.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period before a query is issued, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Config {
    /// Read a config file; a missing file means defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load the effective configuration: the file under the config dir,
    /// with the environment taking precedence for the API key.
    pub fn load(paths: &PathManager) -> Result<Self> {
        let mut config = Self::from_file(&paths.config_file())?;
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.catalog.api_key = Some(key);
            }
        }
        Ok(config)
    }

    /// The API key, or a fatal error telling the user how to provide one.
    pub fn require_api_key(&self) -> Result<&str> {
        match self.catalog.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => bail!(
                "OMDb API key is missing. Set {} or run `reelstash config init`",
                API_KEY_ENV
            ),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write config file {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = Config::from_file(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.catalog.api_key, None);
        assert_eq!(config.catalog.base_url, "https://www.omdbapi.com/");
        assert_eq!(config.search.debounce_ms, 500);
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[catalog]\napi_key = \"abc123\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.catalog.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.search.debounce_ms, 500);
    }

    #[test]
    fn config_round_trips_through_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.catalog.api_key = Some("abc123".to_string());
        config.search.debounce_ms = 250;
        config.save(&path).unwrap();

        let reloaded = Config::from_file(&path).unwrap();
        assert_eq!(reloaded.catalog.api_key.as_deref(), Some("abc123"));
        assert_eq!(reloaded.search.debounce_ms, 250);
    }

    #[test]
    fn missing_api_key_is_a_fatal_error() {
        let config = Config::default();

        let err = config.require_api_key().unwrap_err();
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let mut config = Config::default();
        config.catalog.api_key = Some("   ".to_string());

        assert!(config.require_api_key().is_err());
    }

    #[test]
    fn environment_overrides_the_file_key() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::from_base(dir.path().to_path_buf());
        std::fs::write(paths.config_file(), "[catalog]\napi_key = \"from-file\"\n").unwrap();

        std::env::set_var(API_KEY_ENV, "from-env");
        let config = Config::load(&paths).unwrap();
        std::env::remove_var(API_KEY_ENV);

        assert_eq!(config.catalog.api_key.as_deref(), Some("from-env"));
    }
}
