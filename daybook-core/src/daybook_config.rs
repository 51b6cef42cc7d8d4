//! Global daybook configuration.

use std::path::{Path, PathBuf};

use ::config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{DaybookError, DaybookResult};
use crate::storage::FileStorage;

static DEFAULT_DATA_DIR: &str = "~/.local/share/daybook";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

/// Global configuration at ~/.config/daybook/config.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DaybookConfig {
    /// Directory holding the persisted event slot.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DaybookConfig {
    fn default() -> Self {
        DaybookConfig {
            data_dir: default_data_dir(),
        }
    }
}

impl DaybookConfig {
    pub fn config_path() -> DaybookResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DaybookError::Config("Could not determine config directory".into()))?
            .join("daybook");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented-out default file first
    /// if none exists.
    pub fn load() -> DaybookResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> DaybookResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| DaybookError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DaybookError::Config(e.to_string()))
    }

    /// `data_dir` with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.data_path())
    }

    /// Write this config to `path` as TOML, replacing any comments there.
    pub fn save(&self, path: &Path) -> DaybookResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| DaybookError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DaybookError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| DaybookError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DaybookResult<()> {
        let contents = format!(
            "\
# daybook configuration

# Where your events are stored:
# data_dir = \"{}\"
",
            DEFAULT_DATA_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DaybookError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DaybookError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commented_default_config_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daybook/config.toml");

        DaybookConfig::create_default_config(&path).unwrap();
        let config = DaybookConfig::load_from(&path).unwrap();

        assert_eq!(config.data_dir, default_data_dir());
    }

    #[test]
    fn test_data_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = DaybookConfig {
            data_dir: dir.path().join("events"),
        };

        config.save(&path).unwrap();
        let loaded = DaybookConfig::load_from(&path).unwrap();

        assert_eq!(loaded.data_path(), dir.path().join("events"));
        assert_eq!(loaded.storage().dir(), dir.path().join("events"));
    }

    #[test]
    fn test_tilde_is_expanded() {
        let config = DaybookConfig::default();
        assert!(!config.data_path().to_string_lossy().starts_with('~'));
    }
}
