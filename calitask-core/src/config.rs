//! calitask configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CaliTaskError, CaliTaskResult};
use crate::event::UNTITLED_EVENT;

static DEFAULT_API_URL: &str = "http://localhost:8080";

/// Project that receives imported todos when a dedicated project cannot be created.
const DEFAULT_PROJECT_ID: i64 = 1;

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_project_id() -> i64 {
    DEFAULT_PROJECT_ID
}

fn default_untitled_title() -> String {
    UNTITLED_EVENT.to_string()
}

/// Configuration at ~/.config/calitask/config.toml
///
/// Every field is optional in the file; a missing file means all defaults.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CalitaskConfig {
    /// Base URL of the task storage API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_project_id")]
    pub default_project_id: i64,

    /// Title for events that have no SUMMARY.
    #[serde(default = "default_untitled_title")]
    pub untitled_title: String,
}

impl Default for CalitaskConfig {
    fn default() -> Self {
        CalitaskConfig {
            api_url: default_api_url(),
            default_project_id: default_project_id(),
            untitled_title: default_untitled_title(),
        }
    }
}

impl CalitaskConfig {
    pub fn config_path() -> CaliTaskResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CaliTaskError::Config("Could not determine config directory".into()))?
            .join("calitask");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location.
    pub fn load() -> CaliTaskResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> CaliTaskResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            CaliTaskError::Config(format!("Could not parse {}: {e}", path.display()))
        })
    }

    pub fn save_to(&self, path: &Path) -> CaliTaskResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CaliTaskError::Serialization(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)
            .map_err(|e| CaliTaskError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CaliTaskResult<()> {
        let contents = format!(
            "\
# calitask configuration

# Task storage API that receives imported todos:
# api_url = \"{DEFAULT_API_URL}\"

# Project used when a new project cannot be created for an import:
# default_project_id = {DEFAULT_PROJECT_ID}

# Title for calendar events without a summary:
# untitled_title = \"{UNTITLED_EVENT}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CaliTaskError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CaliTaskError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = CalitaskConfig::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, CalitaskConfig::default());
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.default_project_id, 1);
        assert_eq!(config.untitled_title, "Untitled event");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = \"https://todo.example.com\"\n").unwrap();

        let config = CalitaskConfig::load_from(&path).unwrap();

        assert_eq!(config.api_url, "https://todo.example.com");
        assert_eq!(config.default_project_id, 1);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = CalitaskConfig {
            api_url: "http://127.0.0.1:9000".to_string(),
            default_project_id: 7,
            untitled_title: "(no title)".to_string(),
        };

        config.save_to(&path).unwrap();

        assert_eq!(CalitaskConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("calitask").join("config.toml");

        CalitaskConfig::create_default_config(&path).unwrap();

        assert_eq!(
            CalitaskConfig::load_from(&path).unwrap(),
            CalitaskConfig::default()
        );
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_project_id = \"seven\"").unwrap();

        assert!(matches!(
            CalitaskConfig::load_from(&path),
            Err(CaliTaskError::Config(_))
        ));
    }
}
