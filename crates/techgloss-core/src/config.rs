//! Configuration management for TechGloss.
//!
//! Configuration is stored in TOML format in a platform-appropriate location.
//! Every section is optional; missing keys take their defaults.

use crate::error::{GlossError, Result};
use crate::types::{Language, Theme};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration structure for TechGloss.
///
/// ## Example Configuration File (techgloss.toml)
///
/// ```toml
/// [general]
/// data_dir = "/srv/glossary"
/// log_level = "debug"
///
/// [gateway]
/// text_model = "gemini-3-flash-preview"
/// timeout_secs = 60
/// api_key_env = "GEMINI_API_KEY"
///
/// [ui]
/// default_language = "jp"
/// default_theme = "dark"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// AI enrichment service settings
    pub gateway: GatewayConfig,

    /// UI settings
    pub ui: UiConfig,
}

/// General configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory holding the glossary store (None = default location)
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            data_dir: None,
            log_level: "info".to_string(),
        }
    }
}

/// Generative service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base URL of the generative language API
    pub api_base: String,

    /// Model used for explanations and auto-fill
    pub text_model: String,

    /// Model used for illustrations
    pub image_model: String,

    /// Aspect ratio requested for illustrations
    pub image_aspect_ratio: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            text_model: "gemini-3-flash-preview".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            image_aspect_ratio: "16:9".to_string(),
            timeout_secs: 60,
            api_key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Language used until the user picks one
    pub default_language: Language,

    /// Theme used until the user picks one
    pub default_theme: Theme,

    /// Number of terms listed per page (0 = no limit)
    pub page_size: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            default_language: Language::Mn,
            default_theme: Theme::Light,
            page_size: 50,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default config if no config file exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Config::default());
        }

        info!(path = %path.display(), "Loading configuration");
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents).map_err(|e| GlossError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
        })?;

        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        info!(path = %path.display(), "Saving configuration");
        let contents = toml::to_string_pretty(self).map_err(|e| GlossError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("techgloss.toml"))
    }

    /// Get the default data directory path.
    pub fn default_data_dir() -> Result<PathBuf> {
        Ok(project_dirs()?.data_dir().to_path_buf())
    }

    /// Get the store directory (from config or default).
    pub fn data_dir(&self) -> Result<PathBuf> {
        match self.general.data_dir {
            Some(ref path) => Ok(path.clone()),
            None => Self::default_data_dir(),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "techgloss").ok_or_else(|| GlossError::ConfigError {
        reason: "Could not determine project directories".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.gateway.text_model, "gemini-3-flash-preview");
        assert_eq!(config.gateway.image_aspect_ratio, "16:9");
        assert_eq!(config.gateway.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.ui.default_language, Language::Mn);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("test.toml");

        let mut config = Config::default();
        config.general.data_dir = Some(temp_dir.path().join("data"));
        config.gateway.timeout_secs = 5;
        config.ui.default_theme = Theme::Dark;

        config.save_to(&config_path).unwrap();
        let loaded = Config::load_from(&config_path).unwrap();

        assert_eq!(loaded.gateway.timeout_secs, 5);
        assert_eq!(loaded.ui.default_theme, Theme::Dark);
        assert_eq!(loaded.data_dir().unwrap(), temp_dir.path().join("data"));
    }

    #[test]
    fn test_load_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.ui.page_size, 50);
    }

    #[test]
    fn test_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        fs::write(&config_path, "[ui]\ndefault_language = \"jp\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.ui.default_language, Language::Jp);
        assert_eq!(config.ui.page_size, 50);
        assert_eq!(config.gateway, GatewayConfig::default());
    }

    #[test]
    fn test_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.toml");
        fs::write(&config_path, "[ui]\ndefault_language = \"klingon\"\n").unwrap();

        let result = Config::load_from(&config_path);
        assert!(matches!(result, Err(GlossError::ConfigError { .. })));
    }
}
