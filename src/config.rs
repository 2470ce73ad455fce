//! Configuration management for FlixTUI
//!
//! Handles config file loading/saving and API key resolution.
//! Config is stored at ~/.config/flixtui/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::api::tmdb::DEFAULT_BASE_URL;
use crate::api::{EmbedProvider, TmdbClient};
use crate::models::ThemePreference;

/// Bundled TMDB API key used when nothing else is configured
const DEFAULT_TMDB_KEY: &str = "420dd26414b8bcb319a5d49051b6ac25";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: Option<String>,
    /// API root override (mirrors, testing)
    pub tmdb_base_url: Option<String>,
    /// Persisted colour scheme
    pub theme: ThemePreference,
    /// Provider every detail view opens with
    pub default_provider: Option<EmbedProvider>,
    /// Per-request timeout
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Get config file path (~/.config/flixtui/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("flixtui").join("config.toml"))
    }

    /// Load config from `path`; missing or unreadable files give defaults
    pub fn load_from(path: &Path) -> Self {
        let Ok(text) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed config");
                Self::default()
            }
        }
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Get TMDB API key with fallback chain:
    /// 1. Environment variable TMDB_API_KEY
    /// 2. Key from config file
    /// 3. Bundled default key
    pub fn tmdb_api_key(&self) -> String {
        if let Ok(key) = std::env::var("TMDB_API_KEY") {
            if !key.trim().is_empty() {
                return key;
            }
        }

        self.tmdb_api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TMDB_KEY.to_string())
    }

    pub fn base_url(&self) -> &str {
        self.tmdb_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn provider(&self) -> EmbedProvider {
        self.default_provider.unwrap_or_default()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// API client built from these settings
    pub fn client(&self) -> TmdbClient {
        TmdbClient::with_base_url(self.tmdb_api_key(), self.base_url()).with_timeout(self.timeout())
    }
}

/// Where the theme flag is written back on toggle
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigStore {
    path: Option<PathBuf>,
}

impl ConfigStore {
    /// Store at `path`, or at the default location when `None`
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path: path.or_else(Config::path),
        }
    }

    /// Store that never touches disk
    pub fn ephemeral() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn load(&self) -> Config {
        self.path
            .as_deref()
            .map(Config::load_from)
            .unwrap_or_default()
    }

    /// Persist a new theme, rewriting only the `theme` key.
    ///
    /// A file that is not valid TOML is left untouched and reported as an
    /// error.
    pub fn save_theme(&self, theme: ThemePreference) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        let mut table = match std::fs::read_to_string(path) {
            Ok(text) => text
                .parse::<toml::Table>()
                .with_context(|| format!("refusing to rewrite malformed {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => toml::Table::new(),
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };
        table.insert("theme".into(), toml::Value::String(theme.to_string()));

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(&table)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.tmdb_api_key.is_none());
        assert_eq!(config.theme, ThemePreference::Dark);
        assert_eq!(config.provider(), EmbedProvider::VidsrcCc);
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            tmdb_api_key: Some("abc".into()),
            theme: ThemePreference::Light,
            default_provider: Some(EmbedProvider::Videasy),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn test_missing_and_malformed_files_give_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert_eq!(Config::load_from(&missing), Config::default());

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "theme = [[[").unwrap();
        assert_eq!(Config::load_from(&broken), Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "theme = \"light\"\n").unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.theme, ThemePreference::Light);
        assert!(config.default_provider.is_none());
    }

    #[test]
    fn test_store_saves_theme_without_clobbering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tmdb_api_key = \"mine\"\n").unwrap();

        let store = ConfigStore::new(Some(path.clone()));
        store.save_theme(ThemePreference::Light).unwrap();

        let config = store.load();
        assert_eq!(config.theme, ThemePreference::Light);
        assert_eq!(config.tmdb_api_key.as_deref(), Some("mine"));
    }

    #[test]
    fn test_store_keeps_keys_that_fail_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "tmdb_api_key = \"my-own-key\"\nrequest_timeout_secs = \"ten\"\n",
        )
        .unwrap();

        let store = ConfigStore::new(Some(path.clone()));
        store.save_theme(ThemePreference::Light).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("my-own-key"));
        assert!(text.contains("request_timeout_secs = \"ten\""));
        assert!(text.contains("theme = \"light\""));
    }

    #[test]
    fn test_store_refuses_to_overwrite_unparseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let original = "tmdb_api_key = \"my-own-key\"\ntheme = [[[\n";
        std::fs::write(&path, original).unwrap();

        let store = ConfigStore::new(Some(path.clone()));
        assert!(store.save_theme(ThemePreference::Light).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_store_keeps_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "theme = \"dark\"\ndefault_provider = \"vidsrc.net\"\nextra = 3\n",
        )
        .unwrap();

        let store = ConfigStore::new(Some(path.clone()));
        store.save_theme(ThemePreference::Light).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("extra = 3"));
        let config = store.load();
        assert_eq!(config.theme, ThemePreference::Light);
        assert_eq!(config.provider(), EmbedProvider::VidsrcNet);
    }

    #[test]
    fn test_store_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(Some(dir.path().join("new").join("config.toml")));
        store.save_theme(ThemePreference::Light).unwrap();
        assert_eq!(store.load().theme, ThemePreference::Light);
    }

    #[test]
    fn test_ephemeral_store_is_noop() {
        let store = ConfigStore::ephemeral();
        assert!(store.save_theme(ThemePreference::Light).is_ok());
        assert_eq!(store.load(), Config::default());
    }
}
