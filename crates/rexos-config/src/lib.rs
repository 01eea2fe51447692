//! Configuration management for RexOS
//!
//! Handles frontend settings for game collections and theme sets.
//! Settings live in TOML files, with `REXOS_*` environment overrides.

mod collection_settings;
mod theme_settings;

pub use collection_settings::CollectionSettings;
pub use theme_settings::ThemeSettings;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Layered configuration error: {0}")]
    Layered(#[from] config::ConfigError),
}

/// Standard configuration paths
pub const CONFIG_DIR: &str = "/etc/rexos";
pub const USER_CONFIG_DIR: &str = "/roms/.rexos";

/// Folder (under the user config root) holding custom collection lists
pub const COLLECTIONS_DIR: &str = "collections";

/// Prefix for environment overrides, e.g. `REXOS_COLLECTIONS__BUNDLE_CUSTOM=false`
pub const ENV_PREFIX: &str = "REXOS";

/// Main RexOS configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RexOSConfig {
    #[serde(default)]
    pub collections: CollectionSettings,

    #[serde(default)]
    pub themes: ThemeSettings,
}

impl RexOSConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load a file (if present) with `REXOS_*` environment variables layered on top
    pub fn load_layered(path: &Path) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Self, ConfigError> {
        // Try user config first, then system config
        let user_config = Path::new(USER_CONFIG_DIR).join("config.toml");
        if user_config.exists() {
            return Self::load(&user_config);
        }

        let system_config = Path::new(CONFIG_DIR).join("config.toml");
        if system_config.exists() {
            return Self::load(&system_config);
        }

        // Return default config if no file exists
        tracing::warn!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        tracing::info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Save to default user configuration location
    pub fn save_default(&self) -> Result<(), ConfigError> {
        let user_config = Path::new(USER_CONFIG_DIR).join("config.toml");
        self.save(&user_config)
    }
}

/// Folder holding `custom-<name>.cfg` files for a given user config root
pub fn collections_dir(config_root: &Path) -> PathBuf {
    config_root.join(COLLECTIONS_DIR)
}

/// Default collections folder (`/roms/.rexos/collections`)
pub fn default_collections_dir() -> PathBuf {
    collections_dir(Path::new(USER_CONFIG_DIR))
}
