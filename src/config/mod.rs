use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::notes::DEFAULT_TIMESTAMP_FORMAT;

/// Optional colour overrides, as `#RRGGBB` or `#RGB`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How long the loading screen stays up on startup (0 disables it)
    pub loading_delay_ms: u64,

    /// How long status line messages stay visible
    pub status_timeout_secs: u64,

    /// chrono strftime format used for "Created:" timestamps
    pub timestamp_format: String,

    pub theme: ThemeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            loading_delay_ms: 1500,
            status_timeout_secs: 3,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("jotter");

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default location, falling back to defaults on any problem.
    /// The file is never created or written.
    pub fn load() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_or_default(&path),
            Err(e) => {
                tracing::debug!("No config directory: {}", e);
                AppConfig::default()
            }
        }
    }

    /// Load config from `path` if it exists. Unreadable or malformed files
    /// are logged and replaced by defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return AppConfig::default();
        }

        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config {}: {:#}", path.display(), e);
                AppConfig::default()
            }
        }
    }

    /// Load config from an explicit path. Errors are returned, not swallowed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        Ok(config.sanitized())
    }

    /// Replace values that would break rendering with their defaults
    fn sanitized(mut self) -> Self {
        if !is_valid_timestamp_format(&self.timestamp_format) {
            tracing::warn!(
                "Invalid timestamp_format {:?}, using default",
                self.timestamp_format
            );
            self.timestamp_format = DEFAULT_TIMESTAMP_FORMAT.to_string();
        }
        self
    }

    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_delay_ms)
    }

    pub fn status_timeout(&self) -> Duration {
        Duration::from_secs(self.status_timeout_secs)
    }
}

fn is_valid_timestamp_format(format: &str) -> bool {
    use chrono::format::{Item, StrftimeItems};

    !format.is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            loading_delay_ms: 250,
            status_timeout_secs: 5,
            timestamp_format: "%Y-%m-%d %H:%M".to_string(),
            theme: ThemeConfig {
                accent: Some("#ffc107".to_string()),
                ..ThemeConfig::default()
            },
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized = AppConfig::parse(&serialized).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.loading_delay(), Duration::from_millis(1500));
        assert_eq!(config.status_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_partial_config() {
        let config =
            AppConfig::parse("loading_delay_ms = 0\n[theme]\ndanger = \"#f00\"\n").unwrap();
        assert_eq!(config.loading_delay_ms, 0);
        assert_eq!(config.status_timeout_secs, 3);
        assert_eq!(config.theme.danger.as_deref(), Some("#f00"));
        assert!(config.theme.accent.is_none());
    }

    #[test]
    fn test_invalid_timestamp_format_falls_back() {
        let config = AppConfig::parse("timestamp_format = \"%Q at %H\"").unwrap();
        assert_eq!(config.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);

        let config = AppConfig::parse("timestamp_format = \"\"").unwrap();
        assert_eq!(config.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
    }

    #[test]
    fn test_malformed_config_is_error() {
        assert!(AppConfig::parse("loading_delay_ms = \"soon\"").is_err());
    }

    #[test]
    fn test_load_from_missing_file_is_error() {
        let path = std::env::temp_dir().join("jotter-test-does-not-exist.toml");
        assert!(AppConfig::load_from(&path).is_err());
    }

    /// Unique scratch file under the system temp dir
    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("jotter-{}-{}.toml", name, std::process::id()))
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let path = scratch_path("missing");
        let _ = std::fs::remove_file(&path);
        assert_eq!(AppConfig::load_or_default(&path), AppConfig::default());
    }

    #[test]
    fn test_load_or_default_malformed_file() {
        let path = scratch_path("malformed");
        std::fs::write(&path, "loading_delay_ms = \"soon\"\n").unwrap();

        let config = AppConfig::load_or_default(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_or_default_valid_file() {
        let path = scratch_path("valid");
        std::fs::write(&path, "loading_delay_ms = 0\nstatus_timeout_secs = 9\n").unwrap();

        let config = AppConfig::load_or_default(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(config.loading_delay_ms, 0);
        assert_eq!(config.status_timeout_secs, 9);
        assert_eq!(config.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
    }
}
