//! Shrink Control configuration
//!
//! User configuration for export placement and store defaults.
//! Config file: ~/.config/shrinkctl/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main Shrink Control configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShrinkConfig {
    /// Directory exported investigations are written to.
    /// Defaults to the current directory when unset.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// Store number prefilled on the basic info step
    #[serde(default)]
    pub store_number: Option<String>,
}

impl Default for ShrinkConfig {
    fn default() -> Self {
        Self {
            export_dir: None,
            store_number: None,
        }
    }
}

impl ShrinkConfig {
    /// Get user config path: ~/.config/shrinkctl/config.toml
    pub fn user_config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("XDG_CONFIG_HOME"))
            .context("Cannot determine home directory")?;

        let config_dir = if home.contains("/.config") {
            PathBuf::from(home)
        } else {
            Path::new(&home).join(".config")
        };

        Ok(config_dir.join("shrinkctl").join("config.toml"))
    }

    /// Load configuration from the user config file, falling back to defaults
    pub fn load() -> Result<Self> {
        if let Ok(path) = Self::user_config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ShrinkConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> Result<()> {
        let path = Self::user_config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let toml_string = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        fs::write(&path, toml_string)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Effective export directory
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
