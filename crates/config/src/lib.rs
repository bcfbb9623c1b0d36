//! Configuration loading, validation, and management for Genius.
//!
//! Loads configuration from `~/.genius/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.genius/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default model
    #[serde(default = "default_model")]
    pub default_model: String,

    /// History storage configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Context windowing configuration
    #[serde(default)]
    pub context: ContextConfig,

    /// Generation provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Prompt template configuration
    #[serde(default)]
    pub template: TemplateConfig,
}

fn default_model() -> String {
    "llama3".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Path to the SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Ceiling on how many recent turns are ever fetched from the store
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

fn default_database_path() -> String {
    "conversation_history.db".into()
}
fn default_recent_limit() -> usize {
    100
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            recent_limit: default_recent_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Window used for simple inputs (the policy widens it for complex ones)
    #[serde(default = "default_window")]
    pub default_window: usize,
}

fn default_window() -> usize {
    5
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            default_window: default_window(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Ollama base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sampling temperature; omitted = provider default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:11434".into()
}
fn default_timeout_secs() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            temperature: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Replace the built-in persona prompt entirely.
    /// Must contain `{context}` and `{user_input}` placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_override: Option<String>,
}

impl AppConfig {
    /// Load configuration from the default path (~/.genius/config.toml).
    ///
    /// Environment variable overrides (highest priority):
    /// - `GENIUS_MODEL` — the model name
    /// - `GENIUS_OLLAMA_URL` — provider base URL
    /// - `GENIUS_DB_PATH` — history database path
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(model) = std::env::var("GENIUS_MODEL") {
            config.default_model = model;
        }
        if let Ok(url) = std::env::var("GENIUS_OLLAMA_URL") {
            config.provider.base_url = url;
        }
        if let Ok(path) = std::env::var("GENIUS_DB_PATH") {
            config.history.database_path = path;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".genius")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.recent_limit == 0 {
            return Err(ConfigError::ValidationError(
                "history.recent_limit must be at least 1".into(),
            ));
        }

        if self.context.default_window == 0 {
            return Err(ConfigError::ValidationError(
                "context.default_window must be at least 1".into(),
            ));
        }

        if let Some(t) = self.provider.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(ConfigError::ValidationError(
                    "provider.temperature must be between 0.0 and 2.0".into(),
                ));
            }
        }

        if let Some(template) = &self.template.prompt_override {
            if !template.contains("{context}") || !template.contains("{user_input}") {
                return Err(ConfigError::ValidationError(
                    "template.prompt_override must contain {context} and {user_input}".into(),
                ));
            }
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            history: HistoryConfig::default(),
            context: ContextConfig::default(),
            provider: ProviderConfig::default(),
            template: TemplateConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.default_model, "llama3");
        assert_eq!(config.history.recent_limit, 100);
        assert_eq!(config.context.default_window, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.default_model, config.default_model);
        assert_eq!(parsed.history.recent_limit, config.history.recent_limit);
    }

    #[test]
    fn zero_recent_limit_rejected() {
        let config = AppConfig {
            history: HistoryConfig {
                recent_limit: 0,
                ..HistoryConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_window_rejected() {
        let config = AppConfig {
            context: ContextConfig { default_window: 0 },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_temperature_rejected() {
        let config = AppConfig {
            provider: ProviderConfig {
                temperature: Some(5.0),
                ..ProviderConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn template_override_must_keep_placeholders() {
        let config = AppConfig {
            template: TemplateConfig {
                prompt_override: Some("no placeholders here".into()),
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            template: TemplateConfig {
                prompt_override: Some("{context} and {user_input}".into()),
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().default_model, "llama3");
    }

    #[test]
    fn partial_config_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_model = "mistral"

[context]
default_window = 3
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.default_model, "mistral");
        assert_eq!(config.context.default_window, 3);
        // Untouched sections keep their defaults
        assert_eq!(config.history.recent_limit, 100);
        assert_eq!(config.provider.base_url, "http://localhost:11434");
    }

    #[test]
    fn invalid_config_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[history]\nrecent_limit = 0\n").unwrap();

        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("llama3"));
        assert!(toml_str.contains("conversation_history.db"));
    }
}
