//! Game collection settings

use serde::{Deserialize, Serialize};

/// Settings consumed by the collection registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSettings {
    /// Enabled collection names, comma separated (e.g. `"favorite,recent"`)
    #[serde(default)]
    pub enabled: String,

    /// Sort collections together with systems instead of after them
    #[serde(default)]
    pub sort_with_systems: bool,

    /// Group custom collections without a theme folder under one system
    #[serde(default = "default_true")]
    pub bundle_custom: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            enabled: String::new(),
            sort_with_systems: false,
            bundle_custom: default_true(),
        }
    }
}

impl CollectionSettings {
    /// Enabled collection names, in configured order
    pub fn enabled_list(&self) -> Vec<String> {
        self.enabled
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Replace the enabled list
    pub fn set_enabled_list(&mut self, names: &[String]) {
        self.enabled = names.join(",");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enabled_list_parsing() {
        let settings = CollectionSettings {
            enabled: "favorite, recent,,My Games ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            settings.enabled_list(),
            vec!["favorite", "recent", "My Games"]
        );
    }

    #[test]
    fn test_empty_enabled_list() {
        let settings = CollectionSettings::default();
        assert!(settings.enabled_list().is_empty());
    }

    #[test]
    fn test_set_enabled_list() {
        let mut settings = CollectionSettings::default();
        settings.set_enabled_list(&["all".to_string(), "hidden".to_string()]);
        assert_eq!(settings.enabled, "all,hidden");
    }
}
