use crate::favorites::DEFAULT_FAVORITES_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
///
/// Loaded from `<config dir>/lookbook/config.toml` unless a path is given.
/// A missing file just means defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load config from the default location
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load config from an explicit path, defaults if it does not exist
    pub fn load_from(config_path: &Path) -> crate::Result<Self> {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the config as TOML, creating parent directories
    pub fn save_to(&self, config_path: &Path) -> crate::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, contents)?;
        Ok(())
    }

    /// XDG on Linux, Application Support on macOS, AppData on Windows
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("lookbook");

        Ok(config_dir.join("config.toml"))
    }

    /// Where the favorites database lives
    pub fn db_path(&self) -> crate::Result<PathBuf> {
        if let Some(path) = &self.storage.db_path {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find data directory".into()))?;
        Ok(data_dir.join("lookbook").join("lookbook.db"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path (relative to the working directory) or http(s) URL of the catalog
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    "outfits.json".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Override for the SQLite file, defaults to the user data dir
    #[serde(default)]
    pub db_path: Option<PathBuf>,

    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,
}

fn default_favorites_key() -> String {
    DEFAULT_FAVORITES_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            favorites_key: default_favorites_key(),
        }
    }
}

/// What happens to the gallery when a heart is toggled
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RefreshPolicy {
    /// Patch the one card; recompute only while the favorites view is up
    #[default]
    Patch,
    /// Always recompute the active view
    Recompute,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Category buttons, in order. Empty means "whatever the catalog has".
    #[serde(default)]
    pub categories: Vec<String>,

    /// Tag buttons, in order. Empty means "whatever the catalog has".
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub refresh: RefreshPolicy,

    /// Cards per row in the terminal gallery
    #[serde(default = "default_grid_columns")]
    pub grid_columns: u16,
}

fn default_grid_columns() -> u16 {
    3
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            tags: Vec::new(),
            refresh: RefreshPolicy::default(),
            grid_columns: default_grid_columns(),
        }
    }
}
