//! Application configuration loaded from `config.toml`

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::FileKvStore;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    ConfigDirNotFound,

    #[error("Could not determine data directory")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Settings for the question generation service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeminiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Exam timing for the dashboard countdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExamConfig {
    /// Absolute exam start. When unset the countdown runs from dashboard entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    pub countdown_hours: u64,
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            starts_at: None,
            countdown_hours: 11,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub gemini: GeminiConfig,
    pub exam: ExamConfig,
}

impl AppConfig {
    /// Load from `path`, then apply environment overrides
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    fn load_with(path: &Path, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::load_from(path)?;
        config.apply_env_with(lookup);
        Ok(config)
    }

    /// Load from a specific path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `<config_dir>/iotprep/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join("iotprep").join("config.toml"))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Take the API key from the environment when one is set
    fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let key = API_KEY_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty());
        if let Some(key) = key {
            self.gemini.api_key = Some(key);
        }
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => FileKvStore::default_data_dir().map_err(|_| ConfigError::DataDirNotFound),
        }
    }

    /// Copy safe to print: the API key is masked
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.gemini.api_key.is_some() {
            copy.gemini.api_key = Some("********".to_string());
        }
        copy
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load_from(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(config.gemini.timeout_secs, 60);
        assert_eq!(config.exam.countdown_hours, 11);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
data_dir = "/tmp/iotprep-data"

[gemini]
api_key = "abc"

[exam]
starts_at = "2026-11-25T09:00:00Z"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/iotprep-data"));
        assert_eq!(config.gemini.api_key.as_deref(), Some("abc"));
        assert_eq!(config.gemini.endpoint, GeminiConfig::default().endpoint);
        assert_eq!(
            config.exam.starts_at,
            Some(Utc.with_ymd_and_hms(2026, 11, 25, 9, 0, 0).unwrap())
        );
        assert_eq!(config.exam.countdown_hours, 11);
    }

    #[test]
    fn test_load_applies_env_over_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[gemini]\napi_key = \"from-file\"\n").unwrap();

        let config = AppConfig::load_with(&path, |name| {
            (name == "GEMINI_API_KEY").then(|| "from-env".to_string())
        })
        .unwrap();
        assert_eq!(config.gemini.api_key.as_deref(), Some("from-env"));

        let config = AppConfig::load_with(&path, |_| None).unwrap();
        assert_eq!(config.gemini.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "gemini = 5").unwrap();
        assert!(matches!(AppConfig::load_from(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.exam.countdown_hours = 3;
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_env_key_precedence() {
        let mut config = AppConfig::default();
        config.gemini.api_key = Some("from-file".to_string());

        config.apply_env_with(|name| match name {
            "GEMINI_API_KEY" => Some("  ".to_string()),
            "API_KEY" => Some("fallback".to_string()),
            _ => None,
        });
        assert_eq!(config.gemini.api_key.as_deref(), Some("fallback"));

        config.apply_env_with(|name| match name {
            "GEMINI_API_KEY" => Some("primary".to_string()),
            "API_KEY" => Some("fallback".to_string()),
            _ => None,
        });
        assert_eq!(config.gemini.api_key.as_deref(), Some("primary"));

        config.apply_env_with(|_| None);
        assert_eq!(config.gemini.api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn test_redacted_hides_key() {
        let mut config = AppConfig::default();
        config.gemini.api_key = Some("secret".to_string());
        let shown = config.redacted().to_toml().unwrap();
        assert!(!shown.contains("secret"));
        assert!(shown.contains("********"));
    }
}
