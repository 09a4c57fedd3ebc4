//! TOML settings for the terminal app.
//!
//! A missing file means defaults; a file that fails to parse is an error.
//! Answers are never written here or anywhere else.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogLevel;
use crate::domain::{DomainError, TemplateId};

pub const DEFAULT_CONFIG_PATH: &str = ".config/dapnote.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid start template: {0}")]
    StartTemplate(#[from] DomainError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Overridden by `RUST_LOG` when that is set.
    pub level: LogLevel,
    /// Directory for the rolling log files.
    pub folder: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            folder: "logs".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub show_preview: bool,
    /// Template id to open immediately instead of showing the picker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_template: Option<String>,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_preview: true,
            start_template: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub ui: UiSettings,
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.start_template()?;
        Ok(settings)
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The configured start template, rejecting unknown ids.
    pub fn start_template(&self) -> ConfigResult<Option<TemplateId>> {
        match &self.ui.start_template {
            Some(name) => Ok(Some(name.parse()?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.ui.show_preview);
        assert_eq!(settings.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dapnote.toml");
        fs::write(&path, "[ui]\nstart_template = \"crisis\"\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.start_template().unwrap(), Some(TemplateId::Crisis));
        assert!(settings.ui.show_preview);
        assert_eq!(settings.logging.folder, "logs");
    }

    #[test]
    fn test_log_level_parses_lowercase() {
        let settings = Settings::from_toml_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(settings.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_unknown_start_template_fails() {
        let err = Settings::from_toml_str("[ui]\nstart_template = \"intake\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::StartTemplate(_)));
    }

    #[test]
    fn test_malformed_file_fails() {
        let err = Settings::from_toml_str("[logging\nlevel = ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut settings = Settings::default();
        settings.ui.show_preview = false;
        settings.logging.level = LogLevel::Warn;

        let text = settings.to_toml_string().unwrap();
        assert_eq!(Settings::from_toml_str(&text).unwrap(), settings);
    }
}
