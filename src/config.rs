use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::access::AccessPolicy;
use crate::store::DEFAULT_TABLE;

/// Extension that owns the category screens
pub const DEFAULT_COMPONENT: &str = "com_joomgallery";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_component")]
    pub component: String,
    #[serde(default = "default_table")]
    pub table: String,
    /// SQLite database holding the category table
    #[serde(default)]
    pub database: Option<PathBuf>,
    /// Overrides for translated labels, keyed by language key
    #[serde(default)]
    pub translations: HashMap<String, String>,
    /// Permissions of the user the field is rendered for
    #[serde(default)]
    pub access: AccessPolicy,
}

fn default_component() -> String {
    DEFAULT_COMPONENT.to_string()
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            component: default_component(),
            table: default_table(),
            database: None,
            translations: HashMap::new(),
            access: AccessPolicy::default(),
        }
    }
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("gallery-category-field")
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".gallery-category-field")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location; a missing file yields the defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file doesn't exist, using default config");
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", config_path);

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        debug!(
            "Loaded config for {} with {} translation overrides and {} grants",
            config.component,
            config.translations.len(),
            config.access.grants.len()
        );
        Ok(config)
    }
}
