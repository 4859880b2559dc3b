//! Configuration management for fruitguess.
//!
//! Loads configuration from ${FRUITGUESS_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable that overrides the game server base URL.
pub const API_URL_ENV: &str = "FRUITGUESS_API_URL";

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
pub fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for fruitguess configuration and data directories.
    //!
    //! FRUITGUESS_HOME resolution order:
    //! 1. FRUITGUESS_HOME environment variable (if set)
    //! 2. ~/.config/fruitguess (default)

    use std::path::PathBuf;

    /// Returns the fruitguess home directory.
    pub fn fruitguess_home() -> PathBuf {
        if let Ok(home) = std::env::var("FRUITGUESS_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("fruitguess")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        fruitguess_home().join("config.toml")
    }

    /// Returns the directory that holds log files.
    pub fn logs_dir() -> PathBuf {
        fruitguess_home().join("logs")
    }
}

/// Terminal UI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Event loop tick interval in milliseconds while nothing is in flight.
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: Config::DEFAULT_TICK_MS,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the game server (optional, see `resolve_api_url`).
    pub api_url: Option<String>,

    /// Per-request timeout in seconds (0 disables)
    pub request_timeout_secs: u64,

    /// Terminal UI settings.
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    pub const DEFAULT_API_URL: &str = "https://fruit-akinetor-engine.onrender.com";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_TICK_MS: u64 = 100;

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default config to `path`.
    ///
    /// # Errors
    /// Fails if the file already exists or cannot be written.
    pub fn init_default(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("Config file already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Per-request timeout, `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Idle tick interval for the terminal UI.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.ui.tick_ms.max(10))
    }

    /// Resolves the game server URL with precedence: flag > env > config > default.
    ///
    /// # Errors
    /// Returns an error if the winning value is not a valid URL.
    pub fn resolve_api_url(&self, flag: Option<&str>) -> Result<Url> {
        let env = std::env::var(API_URL_ENV).ok();
        self.resolve_api_url_with(flag, env.as_deref())
    }

    fn resolve_api_url_with(&self, flag: Option<&str>, env: Option<&str>) -> Result<Url> {
        let chosen = [flag, env, self.api_url.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
            .unwrap_or(Self::DEFAULT_API_URL);

        let url = Url::parse(chosen).with_context(|| format!("Invalid game server URL: {chosen}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("Game server URL must use http or https: {chosen}");
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert!(config.api_url.is_none());
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.ui.tick_ms, 100);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = \"http://localhost:5000\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.api_url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "request_timeout_secs = \"soon\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_default_template_parses() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.api_url.is_none());
    }

    #[test]
    fn test_init_default_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::init_default(&path).unwrap();
        assert!(path.exists());

        let err = Config::init_default(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_api_url_precedence() {
        let config = Config {
            api_url: Some("http://config.example".to_string()),
            ..Config::default()
        };

        let url = config
            .resolve_api_url_with(Some("http://flag.example"), Some("http://env.example"))
            .unwrap();
        assert_eq!(url.host_str(), Some("flag.example"));

        let url = config
            .resolve_api_url_with(None, Some("http://env.example"))
            .unwrap();
        assert_eq!(url.host_str(), Some("env.example"));

        let url = config.resolve_api_url_with(None, Some("  ")).unwrap();
        assert_eq!(url.host_str(), Some("config.example"));

        let url = Config::default().resolve_api_url_with(None, None).unwrap();
        assert_eq!(url.as_str(), "https://fruit-akinetor-engine.onrender.com/");
    }

    #[test]
    fn test_api_url_rejects_garbage() {
        let config = Config::default();
        assert!(config.resolve_api_url_with(Some("not a url"), None).is_err());
        assert!(
            config
                .resolve_api_url_with(Some("ftp://example.com"), None)
                .is_err()
        );
    }

    #[test]
    fn test_zero_timeout_disables() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.request_timeout().is_none());
        assert_eq!(
            Config::default().request_timeout(),
            Some(Duration::from_secs(30))
        );
    }
}
