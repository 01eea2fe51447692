//! Theme set settings

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Theme set selection and lookup paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeSettings {
    /// Active theme set name
    #[serde(default = "default_theme_set")]
    pub theme_set: String,

    /// Directories scanned for theme sets; later entries win on name clashes
    #[serde(default = "default_search_paths")]
    pub search_paths: Vec<PathBuf>,
}

fn default_theme_set() -> String {
    "default".to_string()
}

fn default_search_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/etc/rexos/themes"),
        PathBuf::from("/roms/.rexos/themes"),
    ]
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            theme_set: default_theme_set(),
            search_paths: default_search_paths(),
        }
    }
}
