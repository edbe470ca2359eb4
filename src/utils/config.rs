// Configuration utilities and TOML parsing

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use crate::models::settings::Settings;
use crate::utils::error::{Result, VsixError};

const CONFIG_DIR_NAME: &str = "vsix-backup";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration parsing and validation utilities
pub struct ConfigParser;

impl ConfigParser {
    /// Default location of the config file, e.g. ~/.config/vsix-backup/config.toml
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Resolve settings: an explicit path must exist, the default path is optional
    pub fn resolve_settings(explicit: Option<&Path>) -> Result<Settings> {
        if let Some(path) = explicit {
            return Self::load_settings(path);
        }

        match Self::default_config_path() {
            Some(path) if path.exists() => Self::load_settings(path),
            _ => {
                debug!("no config file found, using defaults");
                Ok(Settings::default())
            }
        }
    }

    /// Load and validate settings from a TOML file
    pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(VsixError::ConfigError(
                format!("Configuration file not found: {}", path.display())
            ));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| VsixError::ConfigError(
                format!("Failed to read {}: {}", path.display(), e)
            ))?;

        debug!(path = %path.display(), "loaded config file");
        Self::parse_settings(&content)
    }

    /// Parse settings from a TOML string
    pub fn parse_settings(content: &str) -> Result<Settings> {
        let settings: Settings = toml::from_str(content)
            .map_err(|e| VsixError::ConfigError(
                format!("Invalid TOML syntax: {}", e)
            ))?;

        settings.validate()
            .map_err(VsixError::ConfigError)?;

        Ok(settings)
    }

    /// Save settings to a TOML file, creating parent directories
    pub fn save_settings<P: AsRef<Path>>(settings: &Settings, path: P) -> Result<()> {
        let path = path.as_ref();

        settings.validate()
            .map_err(VsixError::ConfigError)?;

        let content = toml::to_string_pretty(settings)
            .map_err(|e| VsixError::ConfigError(
                format!("Failed to serialize configuration: {}", e)
            ))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content)
            .map_err(|e| VsixError::ConfigError(
                format!("Failed to write {}: {}", path.display(), e)
            ))?;

        Ok(())
    }
}
